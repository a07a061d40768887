//! Sign-in and password reset steps

use cucumber::{given, then, when};

use crate::common::BackendCall;
use crate::features::support::TestWorld;

#[given(expr = "an account {string} with password {string}")]
async fn account_exists(world: &mut TestWorld, email: String, password: String) {
    world.backend.add_account(&email, &password);
}

#[when(expr = "I sign in as {string} with password {string}")]
async fn sign_in(world: &mut TestWorld, email: String, password: String) {
    world
        .submit("/signin", &[("email", email.as_str()), ("password", password.as_str())])
        .await;
}

#[when(expr = "I request a password reset for {string}")]
async fn reset_password(world: &mut TestWorld, email: String) {
    world.submit("/reset-password", &[("email", email.as_str())]).await;
}

#[then("the response should contain a session")]
async fn response_has_session(world: &mut TestWorld) {
    let json = world.response_json();
    assert!(json["access_token"].is_string());
    assert!(json["user"]["id"].is_string());
}

#[then(expr = "the response should echo the provider error {string}")]
async fn response_echoes_provider_error(world: &mut TestWorld, error: String) {
    assert_eq!(world.response_json()["error"], error.as_str());
}

#[then(expr = "a reset email should have been requested for {string}")]
async fn reset_requested(world: &mut TestWorld, email: String) {
    assert!(world
        .backend
        .calls()
        .contains(&BackendCall::ResetPassword { email }));
}
