//! Join request handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use colab_core::requests;
use colab_db::entities::join_request::RequestStatus;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

fn parse_status(s: &str) -> Result<RequestStatus, ApiError> {
    match s {
        "accepted" => Ok(RequestStatus::Accepted),
        "rejected" => Ok(RequestStatus::Rejected),
        other => Err(ApiError::bad_request(format!(
            "Unknown status '{other}'. Expected 'accepted' or 'rejected'"
        ))),
    }
}

/// Create a join request
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateJoinRequest,
    responses(
        (status = 200, description = "Request created", body = JoinRequestDto),
        (status = 400, description = "Self-application, duplicate, or already a member", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateJoinRequest>,
) -> Result<Json<JoinRequestDto>, ApiError> {
    let created = requests::create(
        &state.db,
        payload.project_id,
        auth.user_id,
        payload.role,
        payload.note,
    )
    .await?;

    Ok(Json(created.into()))
}

/// List join requests received for the caller's projects
#[utoipa::path(
    get,
    path = "/api/requests/my-projects",
    responses(
        (status = 200, description = "Received requests", body = ReceivedRequestList),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn list_received_requests(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ReceivedRequestList>, ApiError> {
    debug!(owner = %auth.user_id, "Listing received requests");

    let rows = requests::list_received(&state.db, auth.user_id).await?;
    let total = rows.len();

    Ok(Json(ReceivedRequestList {
        requests: rows.into_iter().map(ReceivedRequestDto::from).collect(),
        total,
    }))
}

/// Accept or reject a join request
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatus,
    responses(
        (status = 200, description = "Updated request", body = JoinRequestDto),
        (status = 400, description = "Member limit reached or invalid status", body = ErrorResponse),
        (status = 403, description = "Not the project owner", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn update_request_status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequestStatus>,
) -> Result<Json<JoinRequestDto>, ApiError> {
    let new_status = parse_status(&payload.status)?;

    let updated = requests::update_status(&state.db, id, new_status, auth.user_id).await?;

    Ok(Json(updated.into()))
}

/// Withdraw or delete a join request
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 403, description = "Neither requester nor owner", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn delete_request(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    requests::delete(&state.db, id, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Request deleted".to_string(),
    }))
}
