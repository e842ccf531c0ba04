//! REST API for CoLab Connect
//!
//! Axum router, JWT auth middleware and OpenAPI documentation over the
//! domain layer in `colab-core`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: Vec<u8>,
    pub allow_signup: bool,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CoLab Connect API",
        version = "0.1.0",
        description = "REST API for posting collaboration projects, requesting to join them, and messaging within project teams",
        contact(
            name = "CoLab Connect Team",
            email = "team@colabconnect.dev"
        )
    ),
    paths(
        handlers::system::health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_current_user,
        handlers::auth::update_profile,
        handlers::projects::create_project,
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::update_project,
        handlers::projects::delete_project,
        handlers::members::list_members,
        handlers::members::remove_member,
        handlers::requests::create_request,
        handlers::requests::list_received_requests,
        handlers::requests::update_request_status,
        handlers::requests::delete_request,
        handlers::messages::send_message,
        handlers::messages::edit_message,
        handlers::messages::delete_message,
        handlers::messages::list_messages,
        handlers::messages::unread_count,
        handlers::notifications::list_notifications,
        handlers::notifications::mark_notification_read,
        handlers::notifications::delete_notification,
    ),
    components(
        schemas(
            models::ErrorResponse,
            models::HealthResponse,
            models::UserProfile,
            models::RegisterRequest,
            models::RegisterResponse,
            models::LoginRequest,
            models::LoginResponse,
            models::UpdateProfileRequest,
            models::MessageResponse,
            models::ProjectDto,
            models::CreateProjectRequest,
            models::UpdateProjectRequest,
            models::ProjectList,
            models::MemberDto,
            models::MemberList,
            models::JoinRequestDto,
            models::CreateJoinRequest,
            models::UpdateRequestStatus,
            models::ReceivedRequestDto,
            models::ReceivedRequestList,
            models::MessageDto,
            models::SendMessageRequest,
            models::EditMessageRequest,
            models::MessageList,
            models::UnreadCount,
            models::NotificationDto,
            models::NotificationList,
        )
    ),
    tags(
        (name = "auth", description = "Authentication and profile endpoints"),
        (name = "projects", description = "Project management endpoints"),
        (name = "members", description = "Project membership endpoints"),
        (name = "requests", description = "Join request lifecycle endpoints"),
        (name = "messages", description = "Project chat endpoints"),
        (name = "notifications", description = "Notification outbox endpoints"),
        (name = "system", description = "System health endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS (for development)
    pub enable_cors: bool,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// Whether new accounts may be registered
    pub allow_signup: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            enable_cors: true,
            jwt_secret: "change-me-in-production".to_string(),
            allow_signup: true,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, db: DatabaseConnection) -> Self {
        let state = Arc::new(AppState {
            db,
            jwt_secret: config.jwt_secret.clone().into_bytes(),
            allow_signup: config.allow_signup,
        });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let jwt_state = Arc::new(middleware::JwtState::new(
            self.config.jwt_secret.as_bytes(),
        ));

        // PUBLIC routes (no authentication required)
        let public_router = Router::new()
            .route("/api/health", get(handlers::health_check))
            .route("/api/auth/register", post(handlers::register))
            .route("/api/auth/login", post(handlers::login))
            .route("/api/auth/logout", post(handlers::logout))
            .with_state(self.state.clone());

        // PROTECTED routes (require a session token)
        let protected_router = Router::new()
            .route(
                "/api/auth/me",
                get(handlers::get_current_user).put(handlers::update_profile),
            )
            .route(
                "/api/projects",
                get(handlers::list_projects).post(handlers::create_project),
            )
            .route(
                "/api/projects/{project_id}",
                get(handlers::get_project)
                    .put(handlers::update_project)
                    .delete(handlers::delete_project),
            )
            .route(
                "/api/projects/{project_id}/members",
                get(handlers::list_members),
            )
            .route(
                "/api/projects/{project_id}/members/{user_id}",
                axum::routing::delete(handlers::remove_member),
            )
            .route("/api/requests", post(handlers::create_request))
            .route(
                "/api/requests/my-projects",
                get(handlers::list_received_requests),
            )
            .route(
                "/api/requests/{id}/status",
                put(handlers::update_request_status),
            )
            .route(
                "/api/requests/{id}",
                axum::routing::delete(handlers::delete_request),
            )
            .route("/api/messages", post(handlers::send_message))
            .route(
                "/api/messages/{id}",
                put(handlers::edit_message).delete(handlers::delete_message),
            )
            .route(
                "/api/messages/project/{project_id}",
                get(handlers::list_messages),
            )
            .route(
                "/api/messages/project/{project_id}/unread",
                get(handlers::unread_count),
            )
            .route("/api/notifications", get(handlers::list_notifications))
            .route(
                "/api/notifications/{id}/read",
                put(handlers::mark_notification_read),
            )
            .route(
                "/api/notifications/{id}",
                axum::routing::delete(handlers::delete_notification),
            )
            .with_state(self.state.clone())
            .layer(axum_middleware::from_fn_with_state(
                jwt_state.clone(),
                middleware::require_auth,
            ));

        let api_router = public_router.merge(protected_router);

        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        // Configure CORS. Cookie-based auth requires credentials, which
        // rules out a wildcard origin.
        let cors = if self.config.enable_cors {
            use tower_http::cors::AllowOrigin;

            let cors_layer = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                        || origin_str.starts_with("https://localhost:")
                        || origin_str.starts_with("https://127.0.0.1:")
                }));

            Some(cors_layer)
        } else {
            None
        };

        let mut router = router.layer(TraceLayer::new_for_http());

        if let Some(cors) = cors {
            router = router.layer(cors);
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        // Ensure OpenAPI spec can be generated without panics
        let _api_doc = ApiDoc::openapi();
    }
}
