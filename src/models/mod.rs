//! Data models

mod auth;
mod member;
mod organisation;

pub use auth::*;
pub use member::*;
pub use organisation::*;

/// Current time as a Unix timestamp in seconds
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Success body carrying a human-readable message
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
