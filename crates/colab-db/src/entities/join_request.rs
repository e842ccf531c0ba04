//! JoinRequest entity, the request queue

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a join request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Waiting for the project owner's decision
    #[sea_orm(string_value = "pending")]
    Pending,

    /// Accepted; the requester became a member
    #[sea_orm(string_value = "accepted")]
    Accepted,

    /// Rejected by the project owner
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl RequestStatus {
    /// Wire form used in notification kinds and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "join_requests")]
pub struct Model {
    /// Request UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Project the user wants to join
    pub project_id: Uuid,

    /// The requesting user
    pub user_id: Uuid,

    /// Role the user is applying for (free text)
    pub role: String,

    /// Note to the project owner
    #[sea_orm(column_type = "Text")]
    pub note: String,

    /// Current status (pending, accepted, rejected)
    pub status: RequestStatus,

    /// When the request was created
    pub created_at: ChronoDateTimeUtc,

    /// When the request was last updated
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Request belongs to a project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Project,

    /// Request belongs to a user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
