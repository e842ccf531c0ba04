//! Project entity for collaboration postings

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Project UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Project title
    pub title: String,

    /// Full project description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Category label (e.g. "web", "game", "research")
    pub category: String,

    /// Lifecycle status (e.g. "open", "in_progress", "completed")
    pub status: String,

    /// Maximum number of members, owner included (>= 2)
    pub member_limit: i32,

    /// User ID of the project owner
    pub owner_id: Uuid,

    /// When the project was created
    pub created_at: ChronoDateTimeUtc,

    /// When the project was last updated
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Project belongs to a user (owner)
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Owner,

    /// Project has members
    #[sea_orm(has_many = "super::project_member::Entity")]
    Members,

    /// Project has join requests
    #[sea_orm(has_many = "super::join_request::Entity")]
    JoinRequests,

    /// Project has chat messages
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::project_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::join_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JoinRequests.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
