//! User entity for authentication and profiles

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// User email (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Name shown to other users
    pub display_name: String,

    /// Short profile bio (optional)
    pub bio: Option<String>,

    /// Avatar image URL (optional)
    pub avatar_url: Option<String>,

    /// Whether the user has a premium subscription
    pub is_premium: bool,

    /// Whether the user account is active
    pub is_active: bool,

    /// When the user account was created
    pub created_at: ChronoDateTimeUtc,

    /// When the user last updated their profile
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// User owns projects
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,

    /// User is a member of projects
    #[sea_orm(has_many = "super::project_member::Entity")]
    Memberships,

    /// User has open or decided join requests
    #[sea_orm(has_many = "super::join_request::Entity")]
    JoinRequests,

    /// User receives notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::project_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::join_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JoinRequests.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
