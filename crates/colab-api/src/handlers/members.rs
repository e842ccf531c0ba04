//! Membership ledger handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use colab_core::members;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// List a project's members
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/members",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "List of members", body = MemberList),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "members"
)]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberList>, ApiError> {
    debug!(project_id = %id, "Listing members");

    let rows = members::list(&state.db, id).await?;
    let total = rows.len();

    Ok(Json(MemberList {
        members: rows.into_iter().map(MemberDto::from).collect(),
        total,
    }))
}

/// Remove a member from a project
#[utoipa::path(
    delete,
    path = "/api/projects/{project_id}/members/{user_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("user_id" = Uuid, Path, description = "User ID of the member to remove")
    ),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 403, description = "Not the owner, or owner self-removal", body = ErrorResponse),
        (status = 404, description = "Project or membership not found", body = ErrorResponse)
    ),
    tag = "members"
)]
pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, ApiError> {
    members::remove(&state.db, project_id, user_id, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Member removed".to_string(),
    }))
}
