//! Test application setup utilities
//!
//! Builds the router over a [`FakeBackend`] so requests can be driven with
//! `oneshot` and the backend inspected afterwards.

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;

use org_portal::{
    api,
    config::{AppConfig, BackendConfig, LoggingConfig, ServerConfig, SignupConfig},
    AppState,
};

use super::mocks::FakeBackend;

/// Test application wrapper for integration testing
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub backend: FakeBackend,
}

impl TestApp {
    /// Create a new test application over an empty fake backend
    pub fn new() -> Self {
        Self::with_backend(FakeBackend::new())
    }

    pub fn with_backend(backend: FakeBackend) -> Self {
        Self::with_config(test_config(), backend)
    }

    /// Create a new test application with custom configuration
    pub fn with_config(config: AppConfig, backend: FakeBackend) -> Self {
        let shared = Arc::new(backend.clone());
        let state = AppState::with_services(config, shared.clone(), shared);
        let router = api::routes().with_state(state.clone());

        Self {
            router,
            state,
            backend,
        }
    }

    /// Make a GET request to the test application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with a URL-encoded form built from `fields`
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        self.post_form_body(uri, &body).await
    }

    /// Make a POST request with an already encoded form body
    pub async fn post_form_body(&self, uri: &str, body: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make an arbitrary request
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: axum::http::StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: bytes::Bytes,
}

impl TestResponse {
    /// Get the response body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse response as JSON")
    }

    /// Assert the response status
    pub fn assert_status(&self, expected: axum::http::StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Assert the response status is OK (200)
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::OK)
    }

    /// Assert the response status is Created (201)
    pub fn assert_created(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::CREATED)
    }

    /// Assert the response status is Bad Request (400)
    pub fn assert_bad_request(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::BAD_REQUEST)
    }

    /// Assert the response status is Not Found (404)
    pub fn assert_not_found(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::NOT_FOUND)
    }

    /// Assert the `message` field of a success body
    pub fn assert_message(&self, expected: &str) -> &Self {
        let json: serde_json::Value = self.json();
        assert_eq!(json["message"], expected, "Body: {}", self.text());
        self
    }
}

/// Configuration pointing at a backend that is never contacted
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        backend: BackendConfig {
            url: "http://backend.invalid".to_string(),
            anon_key: "test-anon-key".to_string(),
            service_role_key: Some("test-service-key".to_string()),
            ..BackendConfig::default()
        },
        signup: SignupConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// Same as [`test_config`] with sign-up rollback switched off
pub fn test_config_without_rollback() -> AppConfig {
    let mut config = test_config();
    config.signup.rollback_on_failure = false;
    config
}
