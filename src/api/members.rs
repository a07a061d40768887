//! Membership endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    models::{DeleteMemberForm, InviteMemberForm, MessageResponse, UpdateMemberRoleForm},
    utils::{AppResult, ValidatedForm},
    AppState,
};

/// POST /invite-member
pub async fn invite_member(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<InviteMemberForm>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .membership_service()
        .invite(form.org_id, form.user_id.trim(), form.role_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Member invited successfully")),
    ))
}

/// POST /delete-member
pub async fn delete_member(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<DeleteMemberForm>,
) -> AppResult<Json<MessageResponse>> {
    state.membership_service().delete(form.member_id).await?;

    Ok(Json(MessageResponse::new("Member deleted successfully")))
}

/// POST /update-member-role
pub async fn update_member_role(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<UpdateMemberRoleForm>,
) -> AppResult<Json<MessageResponse>> {
    state
        .membership_service()
        .update_role(form.member_id, form.role_id)
        .await?;

    Ok(Json(MessageResponse::new("Member role updated successfully")))
}
