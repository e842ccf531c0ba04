//! Project CRUD handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use colab_core::projects::{self, NewProject, ProjectChanges};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectDto),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = projects::create(
        &state.db,
        auth.user_id,
        NewProject {
            title: payload.title,
            description: payload.description,
            category: payload.category,
            member_limit: payload.member_limit,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ProjectDto::from(created))))
}

/// List all projects
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "List of projects", body = ProjectList),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProjectList>, ApiError> {
    debug!("Listing projects");

    let rows = projects::list(&state.db).await?;
    let total = rows.len();

    Ok(Json(ProjectList {
        projects: rows.into_iter().map(ProjectDto::from).collect(),
        total,
    }))
}

/// Get a project by id
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project", body = ProjectDto),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = projects::get(&state.db, id).await?;

    Ok(Json(project.into()))
}

/// Update a project's mutable fields
#[utoipa::path(
    put,
    path = "/api/projects/{project_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 403, description = "Not the owner, or edit window expired", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let updated = projects::update(
        &state.db,
        id,
        auth.user_id,
        ProjectChanges {
            title: payload.title,
            description: payload.description,
            category: payload.category,
            status: payload.status,
        },
    )
    .await?;

    Ok(Json(updated.into()))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/projects/{project_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    projects::delete(&state.db, id, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Project deleted".to_string(),
    }))
}
