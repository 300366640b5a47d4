use std::{env, time::Duration};

use axum::http::HeaderValue;
use thiserror::Error;

const DEFAULT_TABLE_NAME: &str = "Todos";
const DEFAULT_AWS_REGION: &str = "us-west-2";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid CORS origin {0:?}: expected something like http://localhost:3000")]
    InvalidCorsOrigin(String),
    #[error("invalid API prefix {0:?}: must be a non-root path such as /api")]
    InvalidApiPrefix(String),
    #[error("invalid request timeout {0:?}: expected a positive number of seconds")]
    InvalidRequestTimeout(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding the todos (default: "Todos")
    pub table_name: String,
    /// Custom DynamoDB endpoint, e.g. DynamoDB Local (default: none)
    pub dynamodb_endpoint: Option<String>,
    /// AWS region of the table (default: "us-west-2")
    pub aws_region: String,
    /// The single browser origin allowed by CORS (default: "http://localhost:3000")
    pub cors_origin: HeaderValue,
    /// Path prefix the API is mounted under, without trailing slash (default: "/api").
    ///
    /// Never empty: mounting at the root would let `/livez` and `/readyz`
    /// shadow todos with those ids.
    pub api_prefix: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TODOS_TABLE_NAME` - DynamoDB table name (default: "Todos")
    /// - `AWS_ENDPOINT_URL` - DynamoDB endpoint override (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-west-2")
    /// - `CORS_ALLOWED_ORIGIN` - Allowed CORS origin (default: "http://localhost:3000")
    /// - `API_PREFIX` - API path prefix (default: "/api")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_origin = parse_cors_origin(
            &lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        )?;
        let api_prefix = normalize_api_prefix(
            &lookup("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        )?;
        let request_timeout_seconds = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidRequestTimeout(raw)),
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };

        Ok(Self {
            table_name: lookup("TODOS_TABLE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            dynamodb_endpoint: lookup("AWS_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
            aws_region: lookup("AWS_REGION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            cors_origin,
            api_prefix,
            request_timeout_seconds,
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            dynamodb_endpoint: None,
            aws_region: DEFAULT_AWS_REGION.to_string(),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

/// An origin is a scheme plus authority, with no path.
fn parse_cors_origin(raw: &str) -> Result<HeaderValue, ConfigError> {
    let origin = raw.trim().trim_end_matches('/');
    let authority = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidCorsOrigin(raw.to_string()))?;

    if authority.is_empty() || authority.contains('/') {
        return Err(ConfigError::InvalidCorsOrigin(raw.to_string()));
    }

    HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidCorsOrigin(raw.to_string()))
}

/// Returns the prefix with a leading slash and no trailing slash. The root is rejected.
fn normalize_api_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_matches('/');

    if trimmed.is_empty()
        || trimmed
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '*' | '?' | '#'))
    {
        return Err(ConfigError::InvalidApiPrefix(raw.to_string()));
    }

    Ok(format!("/{trimmed}"))
}
