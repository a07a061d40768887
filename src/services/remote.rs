//! Remote backend boundary
//!
//! The identity service and the row store report failures through two
//! channels: non-success responses (or transport errors) and success
//! responses that carry an embedded `error` field. Both are folded into a
//! single [`RemoteFailure`] here so handlers only branch on one shape.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// How a remote call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider throttled the caller
    RateLimited,
    /// The provider answered with a non-success status
    Rejected,
    /// The provider answered 2xx but the payload carries an `error` field
    Embedded,
    /// The provider could not be reached or sent an unusable response
    Unavailable,
}

/// Unified failure reported by the remote backend
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RemoteFailure {
    pub kind: FailureKind,
    /// HTTP status reported by the backend, if a response was received
    pub status: Option<u16>,
    /// Human-readable message extracted from the response
    pub message: String,
    /// Response body as returned by the backend
    pub body: Value,
}

impl RemoteFailure {
    pub fn rate_limited(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: FailureKind::RateLimited,
            status: Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            body: serde_json::json!({ "msg": message }),
            message,
        }
    }

    pub fn rejected(status: u16, body: Value) -> Self {
        let message = describe(&body).unwrap_or_else(|| format!("request failed with status {status}"));
        Self {
            kind: FailureKind::Rejected,
            status: Some(status),
            message,
            body,
        }
    }

    pub fn embedded(error: Value) -> Self {
        let message = describe(&error)
            .or_else(|| error.as_str().map(str::to_string))
            .unwrap_or_else(|| "error reported in response payload".to_string());
        Self {
            kind: FailureKind::Embedded,
            status: None,
            message,
            body: error,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: FailureKind::Unavailable,
            status: None,
            body: serde_json::json!({ "error": message }),
            message,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.kind == FailureKind::RateLimited
    }
}

/// Result of a remote call
pub type RemoteResult<T> = Result<T, RemoteFailure>;

/// Email and password pair sent to the identity service
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Hosted identity provider (credential checks, account creation, password reset)
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email and password for a session
    async fn sign_in_with_password(&self, credentials: &Credentials) -> RemoteResult<Value>;

    /// Register a new account
    async fn sign_up(&self, credentials: &Credentials) -> RemoteResult<Value>;

    /// Send a password reset email
    async fn reset_password_for_email(&self, email: &str) -> RemoteResult<Value>;

    /// Remove an account (admin privileges required)
    async fn delete_user(&self, user_id: &str) -> RemoteResult<()>;

    /// Check that the provider answers
    async fn health(&self) -> RemoteResult<()>;
}

/// Hosted row store exposing insert/update/delete over named tables
///
/// Each operation succeeds only on its expected status (201 for inserts,
/// 200 otherwise) and yields the affected rows.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn insert(&self, table: &str, row: Value) -> RemoteResult<Vec<Value>>;

    async fn update_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
        changes: Value,
    ) -> RemoteResult<Vec<Value>>;

    async fn delete_eq(&self, table: &str, column: &str, value: &str) -> RemoteResult<Vec<Value>>;
}

/// Pull a human-readable message out of a provider error body
pub fn describe(body: &Value) -> Option<String> {
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Classify an identity-service response
pub fn classify_identity(status: StatusCode, body: Value) -> RemoteResult<Value> {
    if !status.is_success() {
        let message = describe(&body).unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS || message.to_lowercase().contains("rate limit")
        {
            return Err(RemoteFailure {
                kind: FailureKind::RateLimited,
                status: Some(status.as_u16()),
                message,
                body,
            });
        }
        return Err(RemoteFailure::rejected(status.as_u16(), body));
    }

    match body.get("error") {
        Some(error) if !error.is_null() => Err(RemoteFailure::embedded(error.clone())),
        _ => Ok(body),
    }
}

/// Classify a row-store response against the status the operation expects
pub fn classify_rows(expected: StatusCode, status: StatusCode, body: Value) -> RemoteResult<Vec<Value>> {
    if status != expected {
        return Err(RemoteFailure::rejected(status.as_u16(), body));
    }

    Ok(match body {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}
