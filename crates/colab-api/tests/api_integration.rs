//! Integration tests for the REST API
//!
//! Drives the router directly with tower's `oneshot`, backed by a real
//! SQLite in-memory database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use colab_api::{models::*, ApiServer, ApiServerConfig};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use tower::ServiceExt; // For `oneshot` method

/// Helper to create an in-memory database with migrations applied
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    colab_db::migrator::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Helper to create a test API server
fn create_test_server(db: DatabaseConnection) -> ApiServer {
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(), // Random port
        enable_cors: true,
        jwt_secret: "test-secret".to_string(),
        allow_signup: true,
    };

    ApiServer::new(config, db)
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Failed to parse body: {} ({})",
            String::from_utf8_lossy(&body),
            e
        )
    })
}

/// Register a user and return their profile and session token
async fn register(app: &Router, email: &str, display_name: &str) -> (UserProfile, String) {
    let request = Request::builder()
        .uri("/api/auth/register")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": email,
                "password": "SecurePassword123!",
                "display_name": display_name
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let data: RegisterResponse = body_json(response).await;
    (data.user, data.token)
}

fn authed(token: &str, method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json");

    match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_registration_success() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let (user, token) = register(&app, "alice@example.com", "Alice").await;

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.display_name, "Alice");
    assert!(!user.is_premium);
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_registration_duplicate_email() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    register(&app, "dup@example.com", "First").await;

    let request = Request::builder()
        .uri("/api/auth/register")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": "dup@example.com",
                "password": "SecurePassword123!",
                "display_name": "Second"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_registration_short_password() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let request = Request::builder()
        .uri("/api/auth/register")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": "weak@example.com",
                "password": "short",
                "display_name": "Weak"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let db = create_test_db().await;
    let server = create_test_server(db);
    let app = server.build_router();

    register(&app, "alice@example.com", "Alice").await;

    let request = Request::builder()
        .uri("/api/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": "alice@example.com",
                "password": "not-the-password"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_success_returns_profile() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    register(&app, "alice@example.com", "Alice").await;

    let request = Request::builder()
        .uri("/api/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": "alice@example.com",
                "password": "SecurePassword123!"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let data: LoginResponse = body_json(response).await;
    assert_eq!(data.user.email, "alice@example.com");
    assert!(!data.token.is_empty());
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let request = Request::builder()
        .uri("/api/projects")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let request = Request::builder()
        .uri("/api/projects")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_roundtrip() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let (user, token) = register(&app, "alice@example.com", "Alice").await;

    let response = app
        .clone()
        .oneshot(authed(&token, "GET", "/api/auth/me", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let me: UserProfile = body_json(response).await;
    assert_eq!(me.id, user.id);
    assert_eq!(me.email, "alice@example.com");
}

#[tokio::test]
async fn test_project_creation_and_listing() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let (user, token) = register(&app, "owner@example.com", "Owner").await;

    let response = app
        .clone()
        .oneshot(authed(
            &token,
            "POST",
            "/api/projects",
            Some(json!({
                "title": "Chess Engine",
                "description": "Building a UCI chess engine",
                "category": "game",
                "member_limit": 4
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let project: ProjectDto = body_json(response).await;
    assert_eq!(project.title, "Chess Engine");
    assert_eq!(project.owner_id, user.id);
    assert_eq!(project.member_limit, 4);
    assert_eq!(project.status, "open");

    let response = app
        .clone()
        .oneshot(authed(&token, "GET", "/api/projects", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list: ProjectList = body_json(response).await;
    assert_eq!(list.total, 1);
    assert_eq!(list.projects[0].id, project.id);
}

#[tokio::test]
async fn test_join_request_accept_flow() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let (_owner, owner_token) = register(&app, "owner@example.com", "Owner").await;
    let (bob, bob_token) = register(&app, "bob@example.com", "Bob").await;

    // Owner posts a project
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "POST",
            "/api/projects",
            Some(json!({
                "title": "Chess Engine",
                "description": "Building a UCI chess engine",
                "category": "game"
            })),
        ))
        .await
        .unwrap();
    let project: ProjectDto = body_json(response).await;

    // Bob asks to join
    let response = app
        .clone()
        .oneshot(authed(
            &bob_token,
            "POST",
            "/api/requests",
            Some(json!({
                "project_id": project.id,
                "role": "Backend",
                "note": "Happy to help"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let request_dto: JoinRequestDto = body_json(response).await;
    assert_eq!(request_dto.status, "pending");

    // Owner sees the request
    let response = app
        .clone()
        .oneshot(authed(&owner_token, "GET", "/api/requests/my-projects", None))
        .await
        .unwrap();
    let received: ReceivedRequestList = body_json(response).await;
    assert_eq!(received.total, 1);
    assert_eq!(received.requests[0].requester_name, "Bob");

    // Bob cannot decide his own request
    let response = app
        .clone()
        .oneshot(authed(
            &bob_token,
            "PUT",
            &format!("/api/requests/{}/status", request_dto.id),
            Some(json!({"status": "accepted"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner accepts
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "PUT",
            &format!("/api/requests/{}/status", request_dto.id),
            Some(json!({"status": "accepted"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let decided: JoinRequestDto = body_json(response).await;
    assert_eq!(decided.status, "accepted");

    // Membership ledger now has owner and Bob
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "GET",
            &format!("/api/projects/{}/members", project.id),
            None,
        ))
        .await
        .unwrap();
    let members: MemberList = body_json(response).await;
    assert_eq!(members.total, 2);
    assert!(members
        .members
        .iter()
        .any(|m| m.user_id == bob.id && m.role == "Backend"));

    // Bob was notified
    let response = app
        .clone()
        .oneshot(authed(&bob_token, "GET", "/api/notifications", None))
        .await
        .unwrap();
    let notifications: NotificationList = body_json(response).await;
    assert!(notifications
        .notifications
        .iter()
        .any(|n| n.kind == "request_accepted"));
}

#[tokio::test]
async fn test_invalid_status_value_rejected() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let (_owner, owner_token) = register(&app, "owner@example.com", "Owner").await;

    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "PUT",
            &format!("/api/requests/{}/status", uuid::Uuid::new_v4()),
            Some(json!({"status": "approved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // "pending" is not a decision either
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "PUT",
            &format!("/api/requests/{}/status", uuid::Uuid::new_v4()),
            Some(json!({"status": "pending"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_message_flow_within_project() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let (_owner, owner_token) = register(&app, "owner@example.com", "Owner").await;
    let (_bob, bob_token) = register(&app, "bob@example.com", "Bob").await;

    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "POST",
            "/api/projects",
            Some(json!({
                "title": "Chess Engine",
                "description": "desc",
                "category": "game"
            })),
        ))
        .await
        .unwrap();
    let project: ProjectDto = body_json(response).await;

    // Owner posts a message
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "POST",
            "/api/messages",
            Some(json!({
                "project_id": project.id,
                "content": "kickoff tomorrow"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let msg: MessageDto = body_json(response).await;
    assert!(!msg.edited);

    // Non-members get 403
    let response = app
        .clone()
        .oneshot(authed(
            &bob_token,
            "GET",
            &format!("/api/messages/project/{}", project.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Empty messages get 400
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "POST",
            "/api/messages",
            Some(json!({
                "project_id": project.id,
                "content": "   "
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The owner can edit within the window
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "PUT",
            &format!("/api/messages/{}", msg.id),
            Some(json!({"content": "kickoff moved to friday"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let edited: MessageDto = body_json(response).await;
    assert!(edited.edited);

    // And sees the log with the edit applied
    let response = app
        .clone()
        .oneshot(authed(
            &owner_token,
            "GET",
            &format!("/api/messages/project/{}", project.id),
            None,
        ))
        .await
        .unwrap();
    let list: MessageList = body_json(response).await;
    assert_eq!(list.total, 1);
    assert_eq!(list.messages[0].content, "kickoff moved to friday");
}

#[tokio::test]
async fn test_signup_disabled() {
    let db = create_test_db().await;
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: false,
        jwt_secret: "test-secret".to_string(),
        allow_signup: false,
    };
    let app = ApiServer::new(config, db).build_router();

    let request = Request::builder()
        .uri("/api/auth/register")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": "late@example.com",
                "password": "SecurePassword123!",
                "display_name": "Late"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let request = Request::builder()
        .uri("/api/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let spec: serde_json::Value = body_json(response).await;
    assert!(spec["paths"]["/api/requests/{id}/status"].is_object());
}
