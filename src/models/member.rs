//! Membership models
//!
//! A membership ties a user to an organisation with a role. Rows live in the
//! remote `member` table.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::OrganisationId;

/// Role granted to the user who creates an organisation
pub const OWNER_ROLE_ID: i32 = 1;

/// Status written on newly created membership and organisation rows
pub const DEFAULT_STATUS: i32 = 0;

/// Membership row sent to the row store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMember {
    pub org_id: OrganisationId,
    pub user_id: String,
    pub role_id: i32,
    pub status: i32,
    pub created_at: i64,
}

impl NewMember {
    /// Owner membership written when an organisation is created at sign-up
    pub fn owner(org_id: OrganisationId, user_id: impl Into<String>, created_at: i64) -> Self {
        Self::with_role(org_id, user_id, OWNER_ROLE_ID, created_at)
    }

    pub fn with_role(org_id: OrganisationId, user_id: impl Into<String>, role_id: i32, created_at: i64) -> Self {
        Self {
            org_id,
            user_id: user_id.into(),
            role_id,
            status: DEFAULT_STATUS,
            created_at,
        }
    }
}

/// Partial update applied when a member's role changes
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleChange {
    pub role_id: i32,
}

/// Invite form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteMemberForm {
    pub org_id: i64,
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    pub user_id: String,
    #[validate(range(min = 1, message = "role_id must be a positive integer"))]
    pub role_id: i32,
}

/// Delete form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteMemberForm {
    pub member_id: i64,
}

/// Role update form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRoleForm {
    pub member_id: i64,
    #[validate(range(min = 1, message = "role_id must be a positive integer"))]
    pub role_id: i32,
}
