//! Account endpoints
//!
//! Sign-in, sign-up and password reset, all delegated to the identity service.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::info;

use crate::{
    models::{MessageResponse, ResetPasswordForm, SignInForm, SignUpForm},
    utils::{AppResult, ValidatedForm},
    AppState,
};

/// Sign-in handler
///
/// POST /signin
///
/// Returns the provider's session payload unchanged.
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<SignInForm>,
) -> AppResult<Json<Value>> {
    let session = state
        .identity
        .sign_in_with_password(&form.credentials())
        .await?;

    info!("Password sign-in succeeded");
    Ok(Json(session))
}

/// Sign-up handler
///
/// POST /signup
///
/// Registers the account, creates its organisation and makes the user owner.
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<SignUpForm>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let outcome = state.signup_service().sign_up(&form).await?;

    info!(user_id = %outcome.user_id, org_id = %outcome.org_id, "Sign-up completed");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "User and organisation created successfully",
        )),
    ))
}

/// Password reset handler
///
/// POST /reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<ResetPasswordForm>,
) -> AppResult<Json<MessageResponse>> {
    state
        .identity
        .reset_password_for_email(&form.email)
        .await?;

    Ok(Json(MessageResponse::new("Password reset email sent")))
}
