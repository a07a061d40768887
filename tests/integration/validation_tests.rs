//! Form validation tests
//!
//! Every rejected submission must be answered with 400 before the backend is
//! contacted.

use rstest::rstest;

use crate::common::TestApp;

#[rstest]
#[case::signin_without_email("/signin", "password=secret")]
#[case::signin_without_password("/signin", "email=ada%40example.com")]
#[case::signin_empty_password("/signin", "email=ada%40example.com&password=")]
#[case::signup_without_email("/signup", "password=secret&org_name=Acme")]
#[case::signup_without_password("/signup", "email=ada%40example.com&org_name=Acme")]
#[case::signup_without_org_name("/signup", "email=ada%40example.com&password=secret")]
#[case::signup_invalid_email("/signup", "email=ada&password=secret&org_name=Acme")]
#[case::signup_blank_org_name("/signup", "email=ada%40example.com&password=secret&org_name=%20%20")]
#[case::reset_without_email("/reset-password", "")]
#[case::invite_without_org_id("/invite-member", "user_id=U1&role_id=2")]
#[case::invite_without_user_id("/invite-member", "org_id=42&role_id=2")]
#[case::invite_without_role_id("/invite-member", "org_id=42&user_id=U1")]
#[case::invite_non_numeric_org_id("/invite-member", "org_id=acme&user_id=U1&role_id=2")]
#[case::invite_zero_role_id("/invite-member", "org_id=42&user_id=U1&role_id=0")]
#[case::delete_without_member_id("/delete-member", "")]
#[case::delete_non_numeric_member_id("/delete-member", "member_id=seven")]
#[case::update_without_member_id("/update-member-role", "role_id=2")]
#[case::update_without_role_id("/update-member-role", "member_id=7")]
#[tokio::test]
async fn test_invalid_submission_is_rejected_locally(#[case] uri: &str, #[case] body: &str) {
    let app = TestApp::new();

    let response = app.post_form_body(uri, body).await;

    response.assert_bad_request();
    assert!(app.backend.calls().is_empty(), "backend contacted for {uri}");
}

#[tokio::test]
async fn test_org_name_too_long_is_rejected() {
    let app = TestApp::new();
    let org_name = "a".repeat(256);

    let response = app
        .post_form(
            "/signup",
            &[
                ("email", "ada@example.com"),
                ("password", "secret"),
                ("org_name", org_name.as_str()),
            ],
        )
        .await;

    response.assert_bad_request();
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], "validation_error");
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_missing_field_error_names_field() {
    let app = TestApp::new();

    let response = app.post_form_body("/delete-member", "").await;

    response.assert_bad_request();
    assert!(response.text().contains("member_id"));
}
