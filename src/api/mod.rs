//! Routes and handlers
//!
//! Every form route answers GET with its HTML page and POST with the action.

use axum::{routing::get, Router};

use crate::AppState;

mod auth;
mod health;
mod members;
mod pages;

pub use health::*;

/// Page and form routes
pub fn portal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/signin", get(pages::signin).post(auth::sign_in))
        .route("/signup", get(pages::signup).post(auth::sign_up))
        .route(
            "/reset-password",
            get(pages::reset_password).post(auth::reset_password),
        )
        .route(
            "/invite-member",
            get(pages::invite_member).post(members::invite_member),
        )
        .route(
            "/delete-member",
            get(pages::delete_member).post(members::delete_member),
        )
        .route(
            "/update-member-role",
            get(pages::update_member_role).post(members::update_member_role),
        )
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/detailed", get(health::health_check_detailed))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
}

/// Create the full router (portal + health; useful for tests)
pub fn routes() -> Router<AppState> {
    portal_routes().merge(health_routes())
}
