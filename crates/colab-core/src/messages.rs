//! Message log operations

use chrono::{Duration, Utc};
use colab_db::entities::{message, Message, User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::{members, CoreError, CoreResult};

/// How long a sender may edit or delete their message after sending
pub const EDIT_WINDOW_MINUTES: i64 = 10;

/// Send a chat message to a project
///
/// The sender must be a current member; attaching an image requires a
/// premium account.
pub async fn append(
    db: &DatabaseConnection,
    project_id: Uuid,
    sender: Uuid,
    content: String,
    image_url: Option<String>,
) -> CoreResult<message::Model> {
    members::find(db, project_id, sender)
        .await?
        .ok_or_else(|| {
            CoreError::Forbidden("You are not a member of this project".to_string())
        })?;

    if image_url.is_some() {
        let user = User::find_by_id(sender)
            .one(db)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

        if !user.is_premium {
            return Err(CoreError::Forbidden(
                "A premium account is required to attach images".to_string(),
            ));
        }
    }

    debug!(%project_id, %sender, "Appending message");

    let now = Utc::now();
    let row = message::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        sender_id: Set(Some(sender)),
        content: Set(content),
        image_url: Set(image_url),
        edited: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(row.insert(db).await?)
}

/// Append a system message with no sender
///
/// Controller-generated; bypasses membership and premium checks. Works on
/// any connection so the accept flow can emit inside its transaction.
pub async fn append_system<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
    content: String,
) -> CoreResult<message::Model> {
    let now = Utc::now();
    let row = message::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        sender_id: Set(None),
        content: Set(content),
        image_url: Set(None),
        edited: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(row.insert(conn).await?)
}

/// Fetch a message and verify the actor sent it within the edit window
async fn editable_by(
    db: &DatabaseConnection,
    message_id: Uuid,
    actor: Uuid,
) -> CoreResult<message::Model> {
    let msg = Message::find_by_id(message_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Message not found".to_string()))?;

    if msg.sender_id != Some(actor) {
        return Err(CoreError::Forbidden(
            "Only the sender can modify this message".to_string(),
        ));
    }

    let elapsed = Utc::now().signed_duration_since(msg.created_at);
    if elapsed > Duration::minutes(EDIT_WINDOW_MINUTES) {
        return Err(CoreError::Forbidden(format!(
            "Messages can only be changed within {EDIT_WINDOW_MINUTES} minutes of sending"
        )));
    }

    Ok(msg)
}

/// Edit a message's content
///
/// Sender only, within the 10-minute window measured against the stored
/// creation timestamp at call time.
pub async fn edit(
    db: &DatabaseConnection,
    message_id: Uuid,
    new_content: String,
    actor: Uuid,
) -> CoreResult<message::Model> {
    let msg = editable_by(db, message_id, actor).await?;

    let mut active: message::ActiveModel = msg.into();
    active.content = Set(new_content);
    active.edited = Set(true);
    active.updated_at = Set(Utc::now());

    Ok(active.update(db).await?)
}

/// Delete a message
///
/// Same sender and window rules as [`edit`].
pub async fn delete(db: &DatabaseConnection, message_id: Uuid, actor: Uuid) -> CoreResult<()> {
    let msg = editable_by(db, message_id, actor).await?;

    msg.delete(db).await?;

    Ok(())
}

/// List a project's messages visible to a member
///
/// New members do not see history predating their membership; rows are
/// ordered by creation time ascending. Updates the caller's last-read
/// marker as a side effect.
pub async fn list_for_member(
    db: &DatabaseConnection,
    project_id: Uuid,
    actor: Uuid,
) -> CoreResult<Vec<message::Model>> {
    let membership = members::find(db, project_id, actor)
        .await?
        .ok_or_else(|| {
            CoreError::Forbidden("You are not a member of this project".to_string())
        })?;

    let rows = Message::find()
        .filter(message::Column::ProjectId.eq(project_id))
        .filter(message::Column::CreatedAt.gte(membership.joined_at))
        .order_by_asc(message::Column::CreatedAt)
        .all(db)
        .await?;

    let mut active: colab_db::entities::project_member::ActiveModel = membership.into();
    active.last_read_at = Set(Some(Utc::now()));
    active.update(db).await?;

    Ok(rows)
}

/// Count messages the member has not read yet
pub async fn unread_count(
    db: &DatabaseConnection,
    project_id: Uuid,
    actor: Uuid,
) -> CoreResult<u64> {
    let membership = members::find(db, project_id, actor)
        .await?
        .ok_or_else(|| {
            CoreError::Forbidden("You are not a member of this project".to_string())
        })?;

    let threshold = membership.last_read_at.unwrap_or(membership.joined_at);

    Ok(Message::find()
        .filter(message::Column::ProjectId.eq(project_id))
        .filter(message::Column::CreatedAt.gt(threshold))
        .count(db)
        .await?)
}
