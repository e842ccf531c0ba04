//! Notification outbox operations

use chrono::Utc;
use colab_db::entities::{notification, Notification};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Notification type tags emitted by this subsystem
pub mod kind {
    pub const NEW_REQUEST: &str = "new_request";
    pub const REQUEST_ACCEPTED: &str = "request_accepted";
    pub const REQUEST_REJECTED: &str = "request_rejected";
    pub const PROJECT_KICKED: &str = "project_kicked";
    /// Reserved for the likes subsystem; never emitted here
    pub const PROJECT_LIKE: &str = "project_like";
}

/// Append a notification to a user's outbox
///
/// Works on any connection so callers can emit inside a transaction.
pub async fn emit<C: ConnectionTrait>(
    conn: &C,
    recipient_id: Uuid,
    kind: &str,
    content: String,
    related_id: Option<Uuid>,
    from_user_id: Option<Uuid>,
) -> CoreResult<notification::Model> {
    debug!(%recipient_id, kind, "Emitting notification");

    let row = notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        recipient_id: Set(recipient_id),
        kind: Set(kind.to_string()),
        content: Set(content),
        related_id: Set(related_id),
        from_user_id: Set(from_user_id),
        is_read: Set(false),
        created_at: Set(Utc::now()),
    };

    Ok(row.insert(conn).await?)
}

/// List a user's own notifications, newest first
pub async fn list(
    db: &DatabaseConnection,
    recipient_id: Uuid,
) -> CoreResult<Vec<notification::Model>> {
    Ok(Notification::find()
        .filter(notification::Column::RecipientId.eq(recipient_id))
        .order_by_desc(notification::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Mark one of the caller's notifications as read
///
/// The original platform silently affected zero rows when the caller did
/// not own the notification; this surfaces an explicit Forbidden instead.
pub async fn mark_read(
    db: &DatabaseConnection,
    notification_id: Uuid,
    actor: Uuid,
) -> CoreResult<notification::Model> {
    let row = Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Notification not found".to_string()))?;

    if row.recipient_id != actor {
        return Err(CoreError::Forbidden(
            "You can only mark your own notifications as read".to_string(),
        ));
    }

    let mut active: notification::ActiveModel = row.into();
    active.is_read = Set(true);

    Ok(active.update(db).await?)
}

/// Delete one of the caller's notifications
pub async fn delete(db: &DatabaseConnection, notification_id: Uuid, actor: Uuid) -> CoreResult<()> {
    let row = Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Notification not found".to_string()))?;

    if row.recipient_id != actor {
        return Err(CoreError::Forbidden(
            "You can only delete your own notifications".to_string(),
        ));
    }

    Notification::delete_by_id(notification_id).exec(db).await?;

    Ok(())
}
