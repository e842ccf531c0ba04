//! API request/response models

use chrono::{DateTime, Utc};
use colab_core::{members::Member, requests::ReceivedRequest};
use colab_db::entities::{join_request, message, notification, project, user};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

// ============================================================
// Auth
// ============================================================

/// User profile as exposed by the API (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserProfile {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            display_name: m.display_name,
            bio: m.bio,
            avatar_url: m.avatar_url,
            is_premium: m.is_premium,
            created_at: m.created_at,
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserProfile,
    /// Session token (also set as an HTTP-only cookie)
    pub token: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserProfile,
    /// Session token (also set as an HTTP-only cookie)
    pub token: String,
}

/// Profile update request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Simple acknowledgement response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================
// Projects
// ============================================================

/// Project as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub member_limit: i32,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectDto {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            category: m.category,
            status: m.status,
            member_limit: m.member_limit,
            owner_id: m.owner_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request to create a project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Maximum member count, owner included (>= 2, default 5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_limit: Option<i32>,
}

/// Request to update a project's mutable fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// List of projects
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectList {
    pub projects: Vec<ProjectDto>,
    pub total: usize,
}

// ============================================================
// Members
// ============================================================

/// Project member with display fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<Member> for MemberDto {
    fn from(m: Member) -> Self {
        Self {
            project_id: m.project_id,
            user_id: m.user_id,
            role: m.role,
            joined_at: m.joined_at,
            display_name: m.display_name,
            avatar_url: m.avatar_url,
        }
    }
}

/// List of project members
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberList {
    pub members: Vec<MemberDto>,
    pub total: usize,
}

// ============================================================
// Join requests
// ============================================================

/// Join request as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JoinRequestDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub note: String,
    /// "pending", "accepted" or "rejected"
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<join_request::Model> for JoinRequestDto {
    fn from(m: join_request::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            user_id: m.user_id,
            role: m.role,
            note: m.note,
            status: m.status.as_str().to_string(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request to create a join request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJoinRequest {
    pub project_id: Uuid,
    /// Role the user is applying for
    #[serde(default)]
    pub role: String,
    /// Note to the project owner
    #[serde(default)]
    pub note: String,
}

/// Request to accept or reject a join request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequestStatus {
    /// New status: "accepted" or "rejected"
    pub status: String,
}

/// A received join request with requester and project display fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceivedRequestDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_title: String,
    pub user_id: Uuid,
    pub requester_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_avatar_url: Option<String>,
    pub role: String,
    pub note: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReceivedRequest> for ReceivedRequestDto {
    fn from(r: ReceivedRequest) -> Self {
        Self {
            id: r.id,
            project_id: r.project_id,
            project_title: r.project_title,
            user_id: r.user_id,
            requester_name: r.requester_name,
            requester_avatar_url: r.requester_avatar_url,
            role: r.role,
            note: r.note,
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
        }
    }
}

/// List of received join requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceivedRequestList {
    pub requests: Vec<ReceivedRequestDto>,
    pub total: usize,
}

// ============================================================
// Messages
// ============================================================

/// Chat message as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub id: Uuid,
    pub project_id: Uuid,
    /// None for system messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Uuid>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
}

impl From<message::Model> for MessageDto {
    fn from(m: message::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            sender_id: m.sender_id,
            content: m.content,
            image_url: m.image_url,
            edited: m.edited,
            created_at: m.created_at,
        }
    }
}

/// Request to send a chat message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub project_id: Uuid,
    pub content: String,
    /// Image attachment URL (premium senders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Request to edit a chat message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EditMessageRequest {
    pub content: String,
}

/// List of chat messages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageList {
    pub messages: Vec<MessageDto>,
    pub total: usize,
}

/// Unread message count for a project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnreadCount {
    pub project_id: Uuid,
    pub unread: u64,
}

// ============================================================
// Notifications
// ============================================================

/// Notification as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: Uuid,
    pub kind: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_user_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notification::Model> for NotificationDto {
    fn from(m: notification::Model) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            content: m.content,
            related_id: m.related_id,
            from_user_id: m.from_user_id,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

/// List of notifications
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationList {
    pub notifications: Vec<NotificationDto>,
    pub total: usize,
}
