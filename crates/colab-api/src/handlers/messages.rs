//! Chat message handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use colab_core::messages;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// Send a chat message to a project
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message sent", body = MessageDto),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 403, description = "Not a member, or premium required for images", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<MessageDto>, ApiError> {
    if payload.content.trim().is_empty() && payload.image_url.is_none() {
        return Err(ApiError::bad_request("Message content must not be empty"));
    }

    let created = messages::append(
        &state.db,
        payload.project_id,
        auth.user_id,
        payload.content,
        payload.image_url,
    )
    .await?;

    Ok(Json(created.into()))
}

/// Edit a chat message
#[utoipa::path(
    put,
    path = "/api/messages/{id}",
    params(
        ("id" = Uuid, Path, description = "Message ID")
    ),
    request_body = EditMessageRequest,
    responses(
        (status = 200, description = "Updated message", body = MessageDto),
        (status = 403, description = "Not the sender, or edit window expired", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn edit_message(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditMessageRequest>,
) -> Result<Json<MessageDto>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::bad_request("Message content must not be empty"));
    }

    let updated = messages::edit(&state.db, id, payload.content, auth.user_id).await?;

    Ok(Json(updated.into()))
}

/// Delete a chat message
#[utoipa::path(
    delete,
    path = "/api/messages/{id}",
    params(
        ("id" = Uuid, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message deleted", body = MessageResponse),
        (status = 403, description = "Not the sender, or window expired", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    messages::delete(&state.db, id, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Message deleted".to_string(),
    }))
}

/// List a project's messages visible to the caller, marking them read
#[utoipa::path(
    get,
    path = "/api/messages/project/{project_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Messages since the caller joined", body = MessageList),
        (status = 403, description = "Not a member", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<MessageList>, ApiError> {
    debug!(%project_id, user_id = %auth.user_id, "Listing messages");

    let rows = messages::list_for_member(&state.db, project_id, auth.user_id).await?;
    let total = rows.len();

    Ok(Json(MessageList {
        messages: rows.into_iter().map(MessageDto::from).collect(),
        total,
    }))
}

/// Count the caller's unread messages in a project
#[utoipa::path(
    get,
    path = "/api/messages/project/{project_id}/unread",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Unread message count", body = UnreadCount),
        (status = 403, description = "Not a member", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<UnreadCount>, ApiError> {
    let unread = messages::unread_count(&state.db, project_id, auth.user_id).await?;

    Ok(Json(UnreadCount { project_id, unread }))
}
