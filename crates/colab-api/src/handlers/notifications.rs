//! Notification handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use colab_core::notifications;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications", body = NotificationList),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<NotificationList>, ApiError> {
    debug!(user_id = %auth.user_id, "Listing notifications");

    let rows = notifications::list(&state.db, auth.user_id).await?;
    let total = rows.len();

    Ok(Json(NotificationList {
        notifications: rows.into_iter().map(NotificationDto::from).collect(),
        total,
    }))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationDto),
        (status = 403, description = "Notification belongs to someone else", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationDto>, ApiError> {
    let updated = notifications::mark_read(&state.db, id, auth.user_id).await?;

    Ok(Json(updated.into()))
}

/// Delete one of the caller's notifications
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification deleted", body = MessageResponse),
        (status = 403, description = "Notification belongs to someone else", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    notifications::delete(&state.db, id, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Notification deleted".to_string(),
    }))
}
