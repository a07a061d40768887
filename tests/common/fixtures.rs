//! Test fixtures
//!
//! Generated form inputs and canned backend payloads.

use fake::{
    faker::{
        company::en::CompanyName,
        internet::en::{Password, SafeEmail},
    },
    Fake,
};

/// Member table name used by the default configuration
pub const MEMBER_TABLE: &str = "member";

/// Organisation table name used by the default configuration
pub const ORGANISATION_TABLE: &str = "organisation";

/// A complete, valid sign-up submission
#[derive(Debug, Clone)]
pub struct SignUpFixture {
    pub email: String,
    pub password: String,
    pub org_name: String,
}

impl SignUpFixture {
    /// Random but valid sign-up data
    pub fn generate() -> Self {
        Self {
            email: SafeEmail().fake(),
            password: Password(12..20).fake(),
            org_name: CompanyName().fake(),
        }
    }

    pub fn fields(&self) -> Vec<(&str, &str)> {
        vec![
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("org_name", self.org_name.as_str()),
        ]
    }
}

/// An existing membership row as the row store would return it
pub fn member_row(id: i64, org_id: i64, user_id: &str, role_id: i32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "org_id": org_id,
        "user_id": user_id,
        "role_id": role_id,
        "status": 0,
        "created_at": 1_700_000_000,
    })
}
