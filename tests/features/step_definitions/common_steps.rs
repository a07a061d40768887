//! Common step definitions used across features

use cucumber::{given, then};

use crate::common::FakeBackend;
use crate::features::support::TestWorld;

#[given("the backend is empty")]
async fn backend_is_empty(world: &mut TestWorld) {
    world.backend = FakeBackend::new();
}

#[given(expr = "new rows are numbered from {int}")]
async fn rows_numbered_from(world: &mut TestWorld, id: i64) {
    world.backend = std::mem::take(&mut world.backend).with_next_id(id);
}

#[then(expr = "the response status should be {int}")]
async fn response_status(world: &mut TestWorld, status: u16) {
    assert_eq!(
        world.response().status.as_u16(),
        status,
        "Body: {}",
        world.response().text()
    );
}

#[then(expr = "the response message should be {string}")]
async fn response_message(world: &mut TestWorld, message: String) {
    assert_eq!(world.response_json()["message"], message.as_str());
}

#[then(expr = "the response error should be {string}")]
async fn response_error(world: &mut TestWorld, error: String) {
    assert_eq!(world.response_json()["error"], error.as_str());
}

#[then("the row store should not have been called")]
async fn no_row_calls(world: &mut TestWorld) {
    assert!(world.backend.row_calls().is_empty());
}
