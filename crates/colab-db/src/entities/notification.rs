//! Notification entity, the per-user outbox

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Notification UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// User this notification is for
    pub recipient_id: Uuid,

    /// Type tag ("new_request", "request_accepted", "request_rejected",
    /// "project_kicked", "project_like", ...)
    pub kind: String,

    /// Human-readable content
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Related entity id (project or request), not a foreign key
    pub related_id: Option<Uuid>,

    /// User whose action triggered this notification
    pub from_user_id: Option<Uuid>,

    /// Whether the recipient has read it
    pub is_read: bool,

    /// When the notification was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Notification belongs to its recipient
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecipientId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Recipient,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
