//! Registration, login and profile handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{Duration, Utc};
use colab_auth::{hash_password, verify_password, JwtClaims, JwtValidator};
use colab_db::entities::{user, User};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// How long a session token stays valid
const SESSION_TTL_HOURS: i64 = 24 * 7;

fn issue_token(state: &AppState, user_id: Uuid) -> Result<String, ApiError> {
    let claims = JwtClaims::session(user_id, Duration::hours(SESSION_TTL_HOURS));
    JwtValidator::encode(&state.jwt_secret, &claims)
        .map_err(|e| ApiError::internal(format!("Failed to issue session token: {e}")))
}

fn session_cookie(token: &str) -> String {
    format!(
        "session_token={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_TTL_HOURS * 3600
    )
}

fn clear_cookie() -> String {
    "session_token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0".to_string()
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input or duplicate email", body = ErrorResponse),
        (status = 403, description = "Signup disabled", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.allow_signup {
        return Err(ApiError::forbidden("Signup is disabled on this server"));
    }

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }
    if payload.display_name.trim().is_empty() {
        return Err(ApiError::bad_request("A display name is required"));
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Email is already registered"));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))?;

    let now = Utc::now();
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        display_name: Set(payload.display_name.trim().to_string()),
        bio: Set(None),
        avatar_url: Set(None),
        is_premium: Set(false),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    info!(user_id = %created.id, "User registered");

    let token = issue_token(&state, created.id)?;
    let cookie = session_cookie(&token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(RegisterResponse {
            user: created.into(),
            token,
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload.email.trim().to_lowercase();

    let found = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            ApiError::unauthorized("Invalid email or password", "INVALID_CREDENTIALS")
        })?;

    let valid = verify_password(&payload.password, &found.password_hash)
        .map_err(|e| ApiError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(ApiError::unauthorized(
            "Invalid email or password",
            "INVALID_CREDENTIALS",
        ));
    }

    if !found.is_active {
        return Err(ApiError::unauthorized(
            "Account is deactivated",
            "ACCOUNT_DEACTIVATED",
        ));
    }

    info!(user_id = %found.id, "User logged in");

    let token = issue_token(&state, found.id)?;
    let cookie = session_cookie(&token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            user: found.into(),
            token,
        }),
    ))
}

/// Log out by clearing the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_cookie())],
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let found = User::find_by_id(auth.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(found.into()))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let found = User::find_by_id(auth.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let mut active: user::ActiveModel = found.into();
    if let Some(display_name) = payload.display_name {
        if display_name.trim().is_empty() {
            return Err(ApiError::bad_request("Display name must not be empty"));
        }
        active.display_name = Set(display_name.trim().to_string());
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(avatar_url) = payload.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;

    Ok(Json(updated.into()))
}
