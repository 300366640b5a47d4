use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use todos_core::storage::{repository_error_to_status_code, RepositoryError};
use todos_core::todo::ValidationError;

/// Errors returned by the todo handlers.
///
/// Every variant renders as `{"error": "<message>"}`. Store failures only
/// expose their operation-level message; the cause is logged instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request timed out")]
    Timeout,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ApiError {
    /// Wraps a repository failure; a `NotFound` stays a `NotFound`.
    pub fn store(context: &'static str, source: RepositoryError) -> Self {
        if source.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Store { context, source }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { source, .. } => {
                StatusCode::from_u16(repository_error_to_status_code(source))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Store { context, source } => {
                tracing::error!(error = %source, context, "Store operation failed");
            }
            ApiError::NotFound => {
                tracing::debug!(status = %status, "Todo not found");
            }
            _ => {
                tracing::warn!(status = %status, message = %self, "Rejected request");
            }
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, json) = body_json(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, serde_json::json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let err = ApiError::store(
            "Failed to fetch todos",
            RepositoryError::ConnectionFailed("dial tcp 10.0.0.1:443: i/o timeout".to_string()),
        );
        let (status, json) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, serde_json::json!({ "error": "Failed to fetch todos" }));
    }

    #[test]
    fn test_store_not_found_becomes_404() {
        let err = ApiError::store(
            "Failed to update todo",
            RepositoryError::todo_not_found("abc"),
        );
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_not_allowed_and_timeout_bodies() {
        let (status, json) = body_json(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json, serde_json::json!({ "error": "Method not allowed" }));

        let (status, json) = body_json(ApiError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(json, serde_json::json!({ "error": "Request timed out" }));
    }

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let (status, json) = body_json(ValidationError::MissingTitle.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "error": "title is required" }));
    }
}
