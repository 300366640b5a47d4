use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::map_response,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer}, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        health::{livez, readyz},
        todos::{
            create_todo, delete_todo, get_todo, list_todos, method_not_allowed, not_found,
            timeout_envelope, update_todo,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    // CORS configuration for API endpoints: only the configured origin is echoed back
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.cors_origin.clone()]))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let prefix = config.api_prefix.as_str();
    let collection = format!("{prefix}/");
    let item = format!("{prefix}/{{id}}");

    // API routes with CORS. `{prefix}` answers the same as `{prefix}/`.
    // The 405 fallback must be set before `.layer(cors)` or preflights answer 405.
    let api_routes = Router::new()
        .route(prefix, get(list_todos).post(create_todo))
        .route(&collection, get(list_todos).post(create_todo))
        .route(
            &item,
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors);

    let mut app = Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .method_not_allowed_fallback(method_not_allowed)
        .merge(api_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(map_response(timeout_envelope));

    for (name, value) in security_headers() {
        app = app.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    app.with_state(state)
}

/// Hardening headers added to every response that does not already set them.
fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("origin-agent-cluster"),
            HeaderValue::from_static("?1"),
        ),
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ),
        (
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
    ]
}
