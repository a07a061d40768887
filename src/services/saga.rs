//! Compensating-action bookkeeping for multi-step remote workflows
//!
//! Every remote write that succeeds registers the action that undoes it.
//! When a later step fails the saga is unwound, running the recorded
//! compensations newest first.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::services::remote::{IdentityProvider, RemoteResult, RowStore};

/// Undo action for a completed step
#[async_trait]
pub trait Compensation: Send + Sync {
    /// Short description used in logs
    fn describe(&self) -> String;

    async fn compensate(&self) -> RemoteResult<()>;
}

/// Deletes an account created by the identity provider
pub struct DeleteUser {
    identity: Arc<dyn IdentityProvider>,
    user_id: String,
}

impl DeleteUser {
    pub fn new(identity: Arc<dyn IdentityProvider>, user_id: impl Into<String>) -> Self {
        Self {
            identity,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl Compensation for DeleteUser {
    fn describe(&self) -> String {
        format!("delete user {}", self.user_id)
    }

    async fn compensate(&self) -> RemoteResult<()> {
        self.identity.delete_user(&self.user_id).await
    }
}

/// Deletes a row inserted into the row store
pub struct DeleteRow {
    rows: Arc<dyn RowStore>,
    table: String,
    id: String,
}

impl DeleteRow {
    pub fn new(rows: Arc<dyn RowStore>, table: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            rows,
            table: table.into(),
            id: id.into(),
        }
    }
}

#[async_trait]
impl Compensation for DeleteRow {
    fn describe(&self) -> String {
        format!("delete {} row {}", self.table, self.id)
    }

    async fn compensate(&self) -> RemoteResult<()> {
        self.rows
            .delete_eq(&self.table, "id", &self.id)
            .await
            .map(|_| ())
    }
}

/// Outcome of unwinding a saga
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnwindReport {
    /// Compensations that succeeded, in execution order
    pub compensated: Vec<String>,
    /// Compensations that failed, with the failure message
    pub failed: Vec<(String, String)>,
}

impl UnwindReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ordered record of completed steps and their compensations
pub struct Saga {
    name: &'static str,
    completed: Vec<Box<dyn Compensation>>,
}

impl Saga {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            completed: Vec::new(),
        }
    }

    /// Register the compensation for a step that just succeeded
    pub fn record(&mut self, compensation: impl Compensation + 'static) {
        self.completed.push(Box::new(compensation));
    }

    /// Number of completed steps
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Describe what would be left behind if the saga were abandoned
    pub fn pending(&self) -> Vec<String> {
        self.completed.iter().map(|c| c.describe()).collect()
    }

    /// Run every recorded compensation, newest first
    ///
    /// A failing compensation does not stop the others.
    pub async fn unwind(self) -> UnwindReport {
        let mut report = UnwindReport::default();

        for compensation in self.completed.into_iter().rev() {
            let description = compensation.describe();
            match compensation.compensate().await {
                Ok(()) => {
                    info!(saga = self.name, step = %description, "Compensation applied");
                    report.compensated.push(description);
                }
                Err(e) => {
                    warn!(saga = self.name, step = %description, error = %e, "Compensation failed");
                    report.failed.push((description, e.message));
                }
            }
        }

        report
    }

    /// Mark the saga as finished; recorded compensations are discarded
    pub fn complete(self) {
        info!(saga = self.name, steps = self.completed.len(), "Saga completed");
    }
}
