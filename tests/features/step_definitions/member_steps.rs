//! Membership steps

use cucumber::{given, then, when};

use crate::common::{member_row, MEMBER_TABLE};
use crate::features::support::TestWorld;

#[given(expr = "member {int} belongs to organisation {int} with role {int}")]
async fn member_exists(world: &mut TestWorld, member_id: i64, org_id: i64, role_id: i32) {
    world
        .backend
        .seed_row(MEMBER_TABLE, member_row(member_id, org_id, "U1", role_id));
}

#[when(expr = "I invite user {string} to organisation {int} with role {int}")]
async fn invite(world: &mut TestWorld, user_id: String, org_id: i64, role_id: i32) {
    let org_id = org_id.to_string();
    let role_id = role_id.to_string();
    world
        .submit(
            "/invite-member",
            &[("org_id", org_id.as_str()), ("user_id", user_id.as_str()), ("role_id", role_id.as_str())],
        )
        .await;
}

#[when(expr = "I delete member {int}")]
async fn delete(world: &mut TestWorld, member_id: i64) {
    let member_id = member_id.to_string();
    world
        .submit("/delete-member", &[("member_id", member_id.as_str())])
        .await;
}

#[when(expr = "I change the role of member {int} to {int}")]
async fn change_role(world: &mut TestWorld, member_id: i64, role_id: i32) {
    let member_id = member_id.to_string();
    let role_id = role_id.to_string();
    world
        .submit(
            "/update-member-role",
            &[("member_id", member_id.as_str()), ("role_id", role_id.as_str())],
        )
        .await;
}

#[then(expr = "member {int} should have role {int}")]
async fn member_has_role(world: &mut TestWorld, member_id: i64, role_id: i32) {
    let rows = world.backend.rows(MEMBER_TABLE);
    let row = rows
        .iter()
        .find(|row| row["id"] == member_id)
        .expect("member not found");
    assert_eq!(row["role_id"], role_id);
}

#[then(expr = "member {int} should not exist")]
async fn member_absent(world: &mut TestWorld, member_id: i64) {
    assert!(!world
        .backend
        .rows(MEMBER_TABLE)
        .iter()
        .any(|row| row["id"] == member_id));
}

#[then(expr = "user {string} should be a member of organisation {int} with role {int}")]
async fn user_is_member(world: &mut TestWorld, user_id: String, org_id: i64, role_id: i32) {
    assert!(world.backend.rows(MEMBER_TABLE).iter().any(|row| {
        row["user_id"] == user_id.as_str() && row["org_id"] == org_id && row["role_id"] == role_id
    }));
}
