//! Sign-in and password reset tests

use axum::http::StatusCode;
use serde_json::json;
use org_portal::services::RemoteFailure;

use crate::common::{BackendCall, FakeBackend, Op, TestApp};

#[tokio::test]
async fn test_sign_in_returns_session() {
    let backend = FakeBackend::new();
    let user_id = backend.add_account("ada@example.com", "correct horse");
    let app = TestApp::with_backend(backend);

    let response = app
        .post_form(
            "/signin",
            &[("email", "ada@example.com"), ("password", "correct horse")],
        )
        .await;

    response.assert_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["user"]["id"], user_id.as_str());
    assert!(json["access_token"].is_string());
}

#[tokio::test]
async fn test_sign_in_wrong_password_echoes_provider_error() {
    let backend = FakeBackend::new();
    backend.add_account("ada@example.com", "correct horse");
    let app = TestApp::with_backend(backend);

    let response = app
        .post_form(
            "/signin",
            &[("email", "ada@example.com"), ("password", "battery staple")],
        )
        .await;

    response.assert_bad_request();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json,
        json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials",
        })
    );
}

#[tokio::test]
async fn test_sign_in_embedded_error_is_rejected() {
    let backend = FakeBackend::new();
    backend.add_account("ada@example.com", "correct horse");
    backend.fail_next(
        Op::SignIn,
        RemoteFailure::embedded(json!({"message": "Email not confirmed"})),
    );
    let app = TestApp::with_backend(backend);

    let response = app
        .post_form(
            "/signin",
            &[("email", "ada@example.com"), ("password", "correct horse")],
        )
        .await;

    response.assert_bad_request();
    let json: serde_json::Value = response.json();
    assert_eq!(json["message"], "Email not confirmed");
}

#[tokio::test]
async fn test_sign_in_rate_limited_is_bad_request() {
    let backend = FakeBackend::new();
    backend.fail_next(Op::SignIn, RemoteFailure::rate_limited("Request rate limit reached"));
    let app = TestApp::with_backend(backend);

    let response = app
        .post_form("/signin", &[("email", "ada@example.com"), ("password", "x")])
        .await;

    response.assert_bad_request();
}

#[tokio::test]
async fn test_sign_in_backend_unreachable_is_bad_gateway() {
    let backend = FakeBackend::new();
    backend.fail_next(Op::SignIn, RemoteFailure::unavailable("Failed to connect to backend"));
    let app = TestApp::with_backend(backend);

    let response = app
        .post_form("/signin", &[("email", "ada@example.com"), ("password", "x")])
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], "backend_error");
}

#[tokio::test]
async fn test_reset_password_sends_email() {
    let app = TestApp::new();

    let response = app
        .post_form("/reset-password", &[("email", " ada@example.com ")])
        .await;

    response.assert_ok().assert_message("Password reset email sent");
    assert_eq!(
        app.backend.calls(),
        vec![BackendCall::ResetPassword {
            email: "ada@example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_reset_password_rejection_echoes_body() {
    let backend = FakeBackend::new();
    backend.fail_next(
        Op::ResetPassword,
        RemoteFailure::rejected(400, json!({"code": 400, "msg": "Unable to validate email address"})),
    );
    let app = TestApp::with_backend(backend);

    let response = app
        .post_form("/reset-password", &[("email", "ada@example.com")])
        .await;

    response.assert_bad_request();
    let json: serde_json::Value = response.json();
    assert_eq!(json["msg"], "Unable to validate email address");
}

#[tokio::test]
async fn test_reset_password_rejects_malformed_email() {
    let app = TestApp::new();

    app.post_form("/reset-password", &[("email", "not-an-email")])
        .await
        .assert_bad_request();
    assert!(app.backend.calls().is_empty());
}
