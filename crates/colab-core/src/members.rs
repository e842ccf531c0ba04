//! Membership ledger operations

use chrono::{DateTime, Utc};
use colab_db::entities::{project_member, Project, ProjectMember, User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{notifications, CoreError, CoreResult};

/// Role label assigned to project owners
pub const OWNER_ROLE: &str = "Owner";
/// Fallback role when a request carries an empty role
pub const DEFAULT_ROLE: &str = "Member";

/// A membership row joined with the member's display fields
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Look up a single membership row
pub async fn find<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
    user_id: Uuid,
) -> CoreResult<Option<project_member::Model>> {
    Ok(ProjectMember::find_by_id((project_id, user_id))
        .one(conn)
        .await?)
}

/// Count members of a project
pub async fn count<C: ConnectionTrait>(conn: &C, project_id: Uuid) -> CoreResult<u64> {
    Ok(ProjectMember::find()
        .filter(project_member::Column::ProjectId.eq(project_id))
        .count(conn)
        .await?)
}

/// List a project's members with user display fields
///
/// Insertion order is not contractual.
pub async fn list(db: &DatabaseConnection, project_id: Uuid) -> CoreResult<Vec<Member>> {
    Project::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))?;

    let rows = ProjectMember::find()
        .filter(project_member::Column::ProjectId.eq(project_id))
        .find_also_related(User)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(membership, user)| {
            user.map(|u| Member {
                project_id: membership.project_id,
                user_id: membership.user_id,
                role: membership.role,
                joined_at: membership.joined_at,
                display_name: u.display_name,
                avatar_url: u.avatar_url,
            })
        })
        .collect())
}

/// Remove a member from a project
///
/// Only the owner may remove, and never themself. The removed user gets a
/// "project_kicked" notification in the same transaction as the delete.
pub async fn remove(
    db: &DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
    actor: Uuid,
) -> CoreResult<()> {
    let txn = db.begin().await?;

    let project = Project::find_by_id(project_id)
        .one(&txn)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))?;

    if project.owner_id != actor {
        return Err(CoreError::Forbidden(
            "Only the project owner can remove members".to_string(),
        ));
    }

    if user_id == actor {
        return Err(CoreError::Forbidden(
            "The owner cannot remove themself from the project".to_string(),
        ));
    }

    let membership = find(&txn, project_id, user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Membership not found".to_string()))?;

    membership.delete(&txn).await?;

    notifications::emit(
        &txn,
        user_id,
        notifications::kind::PROJECT_KICKED,
        format!("You were removed from \"{}\"", project.title),
        Some(project_id),
        Some(actor),
    )
    .await?;

    txn.commit().await?;

    info!(%project_id, %user_id, "Member removed");

    Ok(())
}

/// Ensure every project has a membership row for its owner
///
/// Run during store initialization; idempotent.
pub async fn backfill_owners(db: &DatabaseConnection) -> CoreResult<u64> {
    let projects = Project::find().all(db).await?;
    let mut inserted = 0;

    for p in projects {
        if find(db, p.id, p.owner_id).await?.is_some() {
            continue;
        }

        debug!(project_id = %p.id, owner_id = %p.owner_id, "Backfilling owner membership");

        project_member::ActiveModel {
            project_id: Set(p.id),
            user_id: Set(p.owner_id),
            role: Set(OWNER_ROLE.to_string()),
            joined_at: Set(p.created_at),
            last_read_at: Set(None),
        }
        .insert(db)
        .await?;

        inserted += 1;
    }

    if inserted > 0 {
        info!(inserted, "Backfilled owner memberships");
    }

    Ok(inserted)
}
