//! Organisation Portal Library
//!
//! This crate provides the core functionality for the organisation portal: a
//! thin web front for a hosted identity service and row store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
use services::{
    BackendClient, IdentityProvider, MembershipService, RowStore, SignupService,
};

/// Application state shared across handlers
///
/// Holds no mutable state; every request goes straight to the backend.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Identity service (sign-in, sign-up, password reset)
    pub identity: Arc<dyn IdentityProvider>,
    /// Row store (organisation and member tables)
    pub rows: Arc<dyn RowStore>,
}

impl AppState {
    /// Build state backed by a single client that serves both APIs
    pub fn new(config: AppConfig, client: Arc<BackendClient>) -> Self {
        Self::with_services(config, client.clone(), client)
    }

    /// Build state from explicit service implementations
    pub fn with_services(
        config: AppConfig,
        identity: Arc<dyn IdentityProvider>,
        rows: Arc<dyn RowStore>,
    ) -> Self {
        Self {
            config,
            identity,
            rows,
        }
    }

    pub fn signup_service(&self) -> SignupService {
        SignupService::new(
            self.identity.clone(),
            self.rows.clone(),
            &self.config.backend,
            self.config.signup.rollback_on_failure,
        )
    }

    pub fn membership_service(&self) -> MembershipService {
        MembershipService::new(self.rows.clone(), &self.config.backend)
    }
}
