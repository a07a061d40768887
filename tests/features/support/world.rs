//! Test world for Cucumber scenarios

use cucumber::World;

use crate::common::{test_config, FakeBackend, TestApp, TestResponse};

/// Test world that maintains state across scenario steps
#[derive(Debug, Default, World)]
pub struct TestWorld {
    /// Backend shared by every request in the scenario
    pub backend: FakeBackend,

    /// Run sign-ups without rolling back partial work
    pub rollback_disabled: bool,

    /// Response from the last submission
    pub last_response: Option<TestResponse>,
}

impl TestWorld {
    /// Build the application over the scenario's backend
    pub fn app(&self) -> TestApp {
        let mut config = test_config();
        config.signup.rollback_on_failure = !self.rollback_disabled;
        TestApp::with_config(config, self.backend.clone())
    }

    /// Submit a form and keep the response
    pub async fn submit(&mut self, uri: &str, fields: &[(&str, &str)]) {
        let response = self.app().post_form(uri, fields).await;
        self.last_response = Some(response);
    }

    pub fn response(&self) -> &TestResponse {
        self.last_response
            .as_ref()
            .expect("No response available")
    }

    pub fn response_json(&self) -> serde_json::Value {
        self.response().json()
    }
}
