//! Join request queue and the membership lifecycle controller
//!
//! State machine per (project, user) pair:
//!
//! ```text
//! [none] --create--> pending
//! pending --accept, capacity ok--> accepted  (+membership, +system message, +notification)
//! pending --reject--> rejected               (+notification)
//! pending --accept, capacity full--> pending (error, nothing written)
//! any --delete--> [none]                     (requester or owner only)
//! ```
//!
//! The accept flow runs inside one transaction with the member count
//! re-read under it, so two concurrent accepts cannot push a project past
//! its member limit.

use chrono::{DateTime, Utc};
use colab_db::entities::{
    join_request::{self, RequestStatus},
    project, project_member, JoinRequest, Project, User,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{members, messages, notifications, CoreError, CoreResult};

/// A received request joined with requester and project display fields
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedRequest {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_title: String,
    pub user_id: Uuid,
    pub requester_name: String,
    pub requester_avatar_url: Option<String>,
    pub role: String,
    pub note: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Create a join request
///
/// The requester must not own the project, must not already be a member,
/// and must not have an open or decided request for the pair. Emits a
/// "new_request" notification to the owner in the same transaction.
pub async fn create(
    db: &DatabaseConnection,
    project_id: Uuid,
    requester: Uuid,
    role: String,
    note: String,
) -> CoreResult<join_request::Model> {
    let txn = db.begin().await?;

    let project = Project::find_by_id(project_id)
        .one(&txn)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))?;

    if project.owner_id == requester {
        return Err(CoreError::Conflict(
            "You cannot request to join your own project".to_string(),
        ));
    }

    if members::find(&txn, project_id, requester).await?.is_some() {
        return Err(CoreError::Conflict(
            "You are already a member of this project".to_string(),
        ));
    }

    let existing = JoinRequest::find()
        .filter(join_request::Column::ProjectId.eq(project_id))
        .filter(join_request::Column::UserId.eq(requester))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(CoreError::Conflict(
            "You already have a request for this project".to_string(),
        ));
    }

    let requester_user = User::find_by_id(requester)
        .one(&txn)
        .await?
        .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

    let now = Utc::now();
    let request = join_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        user_id: Set(requester),
        role: Set(role),
        note: Set(note),
        status: Set(RequestStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    notifications::emit(
        &txn,
        project.owner_id,
        notifications::kind::NEW_REQUEST,
        format!(
            "{} wants to join \"{}\"",
            requester_user.display_name, project.title
        ),
        Some(request.id),
        Some(requester),
    )
    .await?;

    txn.commit().await?;

    info!(request_id = %request.id, %project_id, %requester, "Join request created");

    Ok(request)
}

/// Accept or reject a join request
///
/// Owner only. The target must be accepted or rejected; calling with the
/// request's current status is an idempotent no-op that writes nothing. On accept the member count is checked
/// against the project's limit inside the transaction; at capacity the
/// whole flow fails and the request stays pending.
pub async fn update_status(
    db: &DatabaseConnection,
    request_id: Uuid,
    new_status: RequestStatus,
    actor: Uuid,
) -> CoreResult<join_request::Model> {
    // Decisions are one-way: a decided request never returns to pending.
    // Re-applying means deleting the old request and creating a new one.
    if new_status == RequestStatus::Pending {
        return Err(CoreError::Conflict(
            "A request cannot be set back to pending".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let request = JoinRequest::find_by_id(request_id)
        .one(&txn)
        .await?
        .ok_or_else(|| CoreError::NotFound("Request not found".to_string()))?;

    let project = Project::find_by_id(request.project_id)
        .one(&txn)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))?;

    if project.owner_id != actor {
        return Err(CoreError::Forbidden(
            "Only the project owner can decide join requests".to_string(),
        ));
    }

    if request.status == new_status {
        debug!(%request_id, status = new_status.as_str(), "Status unchanged, no-op");
        txn.commit().await?;
        return Ok(request);
    }

    let requester_user = User::find_by_id(request.user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

    if new_status == RequestStatus::Accepted {
        let member_count = members::count(&txn, project.id).await?;
        if member_count >= project.member_limit as u64 {
            return Err(CoreError::CapacityExceeded(format!(
                "Project has reached its member limit of {}",
                project.member_limit
            )));
        }

        // Defensive idempotence: skip the insert if the pair already exists.
        if members::find(&txn, project.id, request.user_id)
            .await?
            .is_none()
        {
            let role = if request.role.trim().is_empty() {
                members::DEFAULT_ROLE.to_string()
            } else {
                request.role.clone()
            };

            project_member::ActiveModel {
                project_id: Set(project.id),
                user_id: Set(request.user_id),
                role: Set(role),
                joined_at: Set(Utc::now()),
                last_read_at: Set(None),
            }
            .insert(&txn)
            .await?;
        }
    }

    let requester_id = request.user_id;
    let mut active: join_request::ActiveModel = request.into();
    active.status = Set(new_status.clone());
    active.updated_at = Set(Utc::now());
    let updated = active.update(&txn).await?;

    let decision = if new_status == RequestStatus::Accepted {
        "accepted"
    } else {
        "rejected"
    };
    let content = format!("Your request to join \"{}\" was {decision}", project.title);

    notifications::emit(
        &txn,
        requester_id,
        &format!("request_{}", new_status.as_str()),
        content,
        Some(project.id),
        Some(actor),
    )
    .await?;

    if new_status == RequestStatus::Accepted {
        messages::append_system(
            &txn,
            project.id,
            format!("{} has joined the project.", requester_user.display_name),
        )
        .await?;
    }

    txn.commit().await?;

    info!(%request_id, status = new_status.as_str(), "Join request decided");

    Ok(updated)
}

/// Withdraw or delete a join request
///
/// Removable by the original requester or the project owner.
pub async fn delete(db: &DatabaseConnection, request_id: Uuid, actor: Uuid) -> CoreResult<()> {
    let request = JoinRequest::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Request not found".to_string()))?;

    let project = Project::find_by_id(request.project_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))?;

    if actor != request.user_id && actor != project.owner_id {
        return Err(CoreError::Forbidden(
            "Only the requester or the project owner can delete a request".to_string(),
        ));
    }

    request.delete(db).await?;

    info!(%request_id, "Join request deleted");

    Ok(())
}

/// List requests received for projects the actor owns, newest first
pub async fn list_received(
    db: &DatabaseConnection,
    owner: Uuid,
) -> CoreResult<Vec<ReceivedRequest>> {
    let rows = JoinRequest::find()
        .find_also_related(Project)
        .filter(project::Column::OwnerId.eq(owner))
        .order_by_desc(join_request::Column::CreatedAt)
        .all(db)
        .await?;

    let mut received = Vec::with_capacity(rows.len());
    for (request, project) in rows {
        let Some(project) = project else { continue };

        let requester = User::find_by_id(request.user_id).one(db).await?;
        let (requester_name, requester_avatar_url) = match requester {
            Some(u) => (u.display_name, u.avatar_url),
            None => ("Unknown user".to_string(), None),
        };

        received.push(ReceivedRequest {
            id: request.id,
            project_id: request.project_id,
            project_title: project.title,
            user_id: request.user_id,
            requester_name,
            requester_avatar_url,
            role: request.role,
            note: request.note,
            status: request.status,
            created_at: request.created_at,
        });
    }

    Ok(received)
}
