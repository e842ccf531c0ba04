//! Project store operations

use chrono::{Duration, Utc};
use colab_db::entities::{project, project_member, Project, User};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::{members, CoreError, CoreResult};

/// Smallest member limit a project may carry (owner plus one)
pub const MIN_MEMBER_LIMIT: i32 = 2;
/// Member limit applied when the creator does not pick one
pub const DEFAULT_MEMBER_LIMIT: i32 = 5;
/// How long non-premium owners may edit a project after creating it
pub const EDIT_WINDOW_MINUTES: i64 = 30;

/// Fields for creating a project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub member_limit: Option<i32>,
}

/// Partial update applied by the owner
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Create a project and its owner membership row in one transaction
pub async fn create(
    db: &DatabaseConnection,
    owner: Uuid,
    new: NewProject,
) -> CoreResult<project::Model> {
    let member_limit = new.member_limit.unwrap_or(DEFAULT_MEMBER_LIMIT);
    if member_limit < MIN_MEMBER_LIMIT {
        return Err(CoreError::Conflict(format!(
            "member_limit must be at least {MIN_MEMBER_LIMIT}"
        )));
    }

    if new.title.trim().is_empty() {
        return Err(CoreError::Conflict("title must not be empty".to_string()));
    }

    let txn = db.begin().await?;

    let now = Utc::now();
    let row = project::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(new.title),
        description: Set(new.description),
        category: Set(new.category),
        status: Set("open".to_string()),
        member_limit: Set(member_limit),
        owner_id: Set(owner),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = row.insert(&txn).await?;

    project_member::ActiveModel {
        project_id: Set(created.id),
        user_id: Set(owner),
        role: Set(members::OWNER_ROLE.to_string()),
        joined_at: Set(now),
        last_read_at: Set(None),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(project_id = %created.id, %owner, "Project created");

    Ok(created)
}

/// Fetch a project by id
pub async fn get(db: &DatabaseConnection, project_id: Uuid) -> CoreResult<project::Model> {
    Project::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))
}

/// List all projects, newest first
pub async fn list(db: &DatabaseConnection) -> CoreResult<Vec<project::Model>> {
    Ok(Project::find()
        .order_by_desc(project::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Update a project's mutable fields
///
/// Owner only. Non-premium owners may edit only within 30 minutes of
/// creation; premium owners are exempt from the window.
pub async fn update(
    db: &DatabaseConnection,
    project_id: Uuid,
    actor: Uuid,
    changes: ProjectChanges,
) -> CoreResult<project::Model> {
    let project = get(db, project_id).await?;

    if project.owner_id != actor {
        return Err(CoreError::Forbidden(
            "Only the project owner can edit the project".to_string(),
        ));
    }

    let owner = User::find_by_id(actor)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

    if !owner.is_premium {
        let elapsed = Utc::now().signed_duration_since(project.created_at);
        if elapsed > Duration::minutes(EDIT_WINDOW_MINUTES) {
            return Err(CoreError::Forbidden(format!(
                "Projects can only be edited within {EDIT_WINDOW_MINUTES} minutes of creation"
            )));
        }
    }

    let mut active: project::ActiveModel = project.into();
    if let Some(title) = changes.title {
        if title.trim().is_empty() {
            return Err(CoreError::Conflict("title must not be empty".to_string()));
        }
        active.title = Set(title);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(category) = changes.category {
        active.category = Set(category);
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now());

    Ok(active.update(db).await?)
}

/// Delete a project
///
/// Owner only; memberships, requests and messages go with it via
/// foreign-key cascades.
pub async fn delete(db: &DatabaseConnection, project_id: Uuid, actor: Uuid) -> CoreResult<()> {
    let project = get(db, project_id).await?;

    if project.owner_id != actor {
        return Err(CoreError::Forbidden(
            "Only the project owner can delete the project".to_string(),
        ));
    }

    project.delete(db).await?;

    info!(%project_id, "Project deleted");

    Ok(())
}
