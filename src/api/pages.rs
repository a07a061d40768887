//! HTML pages
//!
//! Pages are embedded at compile time and served without touching the backend.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

pub async fn signin() -> Html<&'static str> {
    Html(include_str!("../../templates/signin.html"))
}

pub async fn signup() -> Html<&'static str> {
    Html(include_str!("../../templates/signup.html"))
}

pub async fn reset_password() -> Html<&'static str> {
    Html(include_str!("../../templates/reset_password.html"))
}

pub async fn invite_member() -> Html<&'static str> {
    Html(include_str!("../../templates/invite_member.html"))
}

pub async fn delete_member() -> Html<&'static str> {
    Html(include_str!("../../templates/delete_member.html"))
}

pub async fn update_member_role() -> Html<&'static str> {
    Html(include_str!("../../templates/update_member_role.html"))
}
