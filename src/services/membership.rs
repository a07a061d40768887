//! Membership management service

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::{
    config::BackendConfig,
    models::{unix_now, NewMember, OrganisationId, RoleChange},
    services::remote::{RemoteFailure, RowStore},
    utils::AppError,
};

/// Membership operation errors
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("Member {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Remote(#[from] RemoteFailure),

    #[error("failed to encode member row: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<MembershipError> for AppError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::NotFound(member_id) => {
                AppError::not_found(format!("Member {} not found", member_id))
            }
            MembershipError::Remote(failure) => failure.into(),
            MembershipError::Encode(e) => AppError::internal(e.to_string()),
        }
    }
}

/// Membership service over the remote `member` table
pub struct MembershipService {
    rows: Arc<dyn RowStore>,
    table: String,
}

impl MembershipService {
    pub fn new(rows: Arc<dyn RowStore>, backend: &BackendConfig) -> Self {
        Self {
            rows,
            table: backend.member_table.clone(),
        }
    }

    /// Insert a membership row
    ///
    /// Organisation and user are not checked for existence; the row store's
    /// constraints decide.
    pub async fn invite(&self, org_id: i64, user_id: &str, role_id: i32) -> Result<Vec<Value>, MembershipError> {
        let member = NewMember::with_role(OrganisationId::from(org_id), user_id, role_id, unix_now());
        let row = serde_json::to_value(&member)?;
        let rows = self.rows.insert(&self.table, row).await?;
        info!(org_id, role_id, "Member invited");
        Ok(rows)
    }

    /// Delete a membership by id
    ///
    /// A delete that matches no row is reported as [`MembershipError::NotFound`],
    /// so repeating a delete is not silently successful.
    pub async fn delete(&self, member_id: i64) -> Result<Vec<Value>, MembershipError> {
        let rows = self
            .rows
            .delete_eq(&self.table, "id", &member_id.to_string())
            .await?;
        if rows.is_empty() {
            return Err(MembershipError::NotFound(member_id));
        }
        info!(member_id, "Member deleted");
        Ok(rows)
    }

    /// Change the role of a membership
    pub async fn update_role(&self, member_id: i64, role_id: i32) -> Result<Vec<Value>, MembershipError> {
        let changes = serde_json::to_value(RoleChange { role_id })?;
        let rows = self
            .rows
            .update_eq(&self.table, "id", &member_id.to_string(), changes)
            .await?;
        if rows.is_empty() {
            return Err(MembershipError::NotFound(member_id));
        }
        info!(member_id, role_id, "Member role updated");
        Ok(rows)
    }
}
