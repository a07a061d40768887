//! Error types and handling
//!
//! All local errors are converted to a consistent JSON response format.
//! Rejections reported by the remote backend are echoed back verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::remote::{FailureKind, RemoteFailure};

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Bad request - malformed or missing input (400)
    #[error("{0}")]
    BadRequest(String),

    /// Field validation failed (400)
    #[error("{0}")]
    ValidationError(String),

    /// Remote backend rejected the call; the body is passed through (400)
    #[error("Rejected by backend: {0}")]
    Rejected(serde_json::Value),

    /// Too many requests (429)
    #[error("{0}")]
    TooManyRequests(String),

    /// Backend unreachable or answered with something unusable (502)
    #[error("Backend error: {0}")]
    Upstream(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }
}

/// Error response body
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error kind for programmatic handling
    pub code: String,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, should_log) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", false),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", false),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error", false),
            AppError::Rejected(_) => (StatusCode::BAD_REQUEST, "rejected", false),
            AppError::TooManyRequests(_) => (StatusCode::TOO_MANY_REQUESTS, "rate_limited", false),
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, "backend_error", true),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", true),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", true),
        };

        if should_log {
            error!(error = %self, error_type = code, "Request error");
        }

        if let AppError::Rejected(body) = self {
            return (status, Json(body)).into_response();
        }

        let body = ErrorResponse::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

impl From<RemoteFailure> for AppError {
    fn from(failure: RemoteFailure) -> Self {
        match failure.kind {
            FailureKind::Unavailable => AppError::Upstream(failure.message),
            FailureKind::RateLimited | FailureKind::Rejected | FailureKind::Embedded => {
                AppError::Rejected(failure.body)
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
