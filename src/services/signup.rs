//! Sign-up workflow
//!
//! Registers the account, creates the organisation and makes the new user
//! its owner. The three remote writes are independent transactions, so each
//! one registers a compensation with a [`Saga`] and a failure part-way
//! through unwinds what was already committed.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    config::BackendConfig,
    models::{unix_now, NewMember, NewOrganisation, OrganisationId, SignUpForm},
    services::{
        remote::{FailureKind, IdentityProvider, RemoteFailure, RowStore},
        saga::{DeleteRow, DeleteUser, Saga},
    },
    utils::AppError,
};

/// Message returned when the identity provider throttles registration
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Sign-up workflow errors
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("registration rate limited: {0}")]
    RateLimited(RemoteFailure),

    #[error("registration rejected: {0}")]
    RegistrationRejected(RemoteFailure),

    #[error("registration response has no user id")]
    MissingUserId,

    #[error("organisation insert rejected: {0}")]
    OrganisationRejected(RemoteFailure),

    #[error("organisation insert returned no id")]
    MissingOrganisationId,

    #[error("membership insert rejected: {0}")]
    MembershipRejected(RemoteFailure),

    #[error("failed to encode {table} row: {source}")]
    Encode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("backend unavailable: {0}")]
    Unavailable(RemoteFailure),
}

impl SignupError {
    fn from_registration(failure: RemoteFailure) -> Self {
        match failure.kind {
            FailureKind::RateLimited => SignupError::RateLimited(failure),
            FailureKind::Unavailable => SignupError::Unavailable(failure),
            FailureKind::Rejected | FailureKind::Embedded => SignupError::RegistrationRejected(failure),
        }
    }

    fn from_insert(failure: RemoteFailure, rejected: fn(RemoteFailure) -> Self) -> Self {
        match failure.kind {
            FailureKind::Unavailable => SignupError::Unavailable(failure),
            _ => rejected(failure),
        }
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        let description = err.to_string();
        match err {
            SignupError::RateLimited(_) => AppError::TooManyRequests(RATE_LIMITED_MESSAGE.to_string()),
            SignupError::RegistrationRejected(failure) => match failure.kind {
                FailureKind::Embedded => AppError::Rejected(failure.body),
                _ => AppError::bad_request(failure.message),
            },
            SignupError::OrganisationRejected(failure) | SignupError::MembershipRejected(failure) => {
                AppError::Rejected(failure.body)
            }
            SignupError::MissingUserId | SignupError::MissingOrganisationId => {
                AppError::upstream(description)
            }
            SignupError::Unavailable(failure) => AppError::upstream(failure.message),
            SignupError::Encode { .. } => AppError::internal(description),
        }
    }
}

/// Identifiers produced by a completed sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub user_id: String,
    pub org_id: OrganisationId,
}

/// Sign-up workflow service
pub struct SignupService {
    identity: Arc<dyn IdentityProvider>,
    rows: Arc<dyn RowStore>,
    organisation_table: String,
    member_table: String,
    rollback_on_failure: bool,
}

impl SignupService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        rows: Arc<dyn RowStore>,
        backend: &BackendConfig,
        rollback_on_failure: bool,
    ) -> Self {
        Self {
            identity,
            rows,
            organisation_table: backend.organisation_table.clone(),
            member_table: backend.member_table.clone(),
            rollback_on_failure,
        }
    }

    /// Run the full workflow for a validated sign-up form
    ///
    /// On failure, whatever was already written is undone before the error
    /// is returned.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<SignupOutcome, SignupError> {
        let mut saga = Saga::new("signup");

        match self.run(form, &mut saga).await {
            Ok(outcome) => {
                saga.complete();
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "Sign-up failed");
                self.abort(saga).await;
                Err(err)
            }
        }
    }

    async fn run(&self, form: &SignUpForm, saga: &mut Saga) -> Result<SignupOutcome, SignupError> {
        let registration = self
            .identity
            .sign_up(&form.credentials())
            .await
            .map_err(SignupError::from_registration)?;

        let user_id = registered_user_id(&registration).ok_or(SignupError::MissingUserId)?;
        info!(user_id = %user_id, "Account registered");
        saga.record(DeleteUser::new(self.identity.clone(), user_id.clone()));

        let organisation = NewOrganisation::new(form.org_name.trim(), unix_now());
        let org_rows = self
            .rows
            .insert(&self.organisation_table, to_row(&self.organisation_table, &organisation)?)
            .await
            .map_err(|failure| SignupError::from_insert(failure, SignupError::OrganisationRejected))?;

        let org_id = OrganisationId::from_rows(&org_rows).ok_or_else(|| {
            error!(user_id = %user_id, "Organisation insert returned no id");
            SignupError::MissingOrganisationId
        })?;
        info!(user_id = %user_id, org_id = %org_id, "Organisation created");
        saga.record(DeleteRow::new(
            self.rows.clone(),
            self.organisation_table.clone(),
            org_id.as_filter(),
        ));

        let member = NewMember::owner(org_id.clone(), user_id.clone(), unix_now());
        self.rows
            .insert(&self.member_table, to_row(&self.member_table, &member)?)
            .await
            .map_err(|failure| SignupError::from_insert(failure, SignupError::MembershipRejected))?;

        info!(user_id = %user_id, org_id = %org_id, "Owner membership created");
        Ok(SignupOutcome { user_id, org_id })
    }

    async fn abort(&self, saga: Saga) {
        if saga.is_empty() {
            return;
        }

        if !self.rollback_on_failure {
            warn!(
                orphaned = ?saga.pending(),
                "Sign-up failed part-way; rollback disabled, remote records left in place"
            );
            return;
        }

        let report = saga.unwind().await;
        if report.is_complete() {
            info!(compensated = ?report.compensated, "Sign-up rolled back");
        } else {
            error!(
                compensated = ?report.compensated,
                failed = ?report.failed,
                "Sign-up rollback incomplete; manual cleanup required"
            );
        }
    }
}

/// Read the new account id from a registration response
///
/// Providers answer either with a session (`{"user": {"id": ..}}`) or, when
/// email confirmation is pending, with the bare user object.
pub fn registered_user_id(registration: &Value) -> Option<String> {
    registration
        .get("user")
        .and_then(|user| user.get("id"))
        .or_else(|| registration.get("id"))
        .and_then(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn to_row<T: serde::Serialize>(table: &str, row: &T) -> Result<Value, SignupError> {
    serde_json::to_value(row).map_err(|source| SignupError::Encode {
        table: table.to_string(),
        source,
    })
}
