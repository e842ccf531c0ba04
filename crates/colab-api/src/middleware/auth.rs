//! JWT authentication middleware
//!
//! Extracts the session token from the `session_token` cookie or the
//! Authorization header, validates it, and makes the authenticated user's
//! id available to handlers via Axum's Extension.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use colab_auth::{JwtValidator, SESSION_TOKEN_TYPE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::ErrorResponse;

/// Authenticated user context extracted from the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User UUID from the token's subject claim
    pub user_id: Uuid,
}

/// JWT validation state shared across middleware instances
#[derive(Clone)]
pub struct JwtState {
    pub validator: Arc<JwtValidator>,
}

impl JwtState {
    /// Create new JWT state with the given secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            validator: Arc::new(JwtValidator::new(secret)),
        }
    }
}

fn unauthorized(error: &str, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: error.to_string(),
            code: Some(code.to_string()),
        }),
    )
}

/// Authentication middleware for protected routes
///
/// Looks for the token in the `session_token` cookie first (web clients),
/// then in an `Authorization: Bearer <token>` header (API clients).
/// Returns 401 when the token is missing, malformed, expired, or not a
/// session token.
pub async fn require_auth(
    state: axum::extract::State<Arc<JwtState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = if let Some(cookie_header) = request.headers().get(header::COOKIE) {
        cookie_header.to_str().ok().and_then(|cookies| {
            cookies
                .split(';')
                .map(|c| c.trim())
                .find(|c| c.starts_with("session_token="))
                .and_then(|c| c.strip_prefix("session_token="))
        })
    } else {
        None
    };

    let token = match token {
        Some(t) => t.to_string(),
        None => {
            let auth_header = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    unauthorized(
                        "Missing authentication token (cookie or Authorization header)",
                        "MISSING_AUTH",
                    )
                })?;

            auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| {
                    unauthorized(
                        "Invalid Authorization header format. Expected 'Bearer <token>'",
                        "INVALID_AUTH_FORMAT",
                    )
                })?
                .to_string()
        }
    };

    let claims = state.validator.validate(&token).map_err(|e| {
        unauthorized(&format!("Invalid or expired token: {e}"), "INVALID_TOKEN")
    })?;

    if claims.token_type != SESSION_TOKEN_TYPE {
        return Err(unauthorized(
            &format!(
                "Invalid token type '{}'. Expected '{SESSION_TOKEN_TYPE}' token for API access",
                claims.token_type
            ),
            "INVALID_TOKEN_TYPE",
        ));
    }

    let user_id = claims
        .user_id()
        .map_err(|_| unauthorized("Token carries a malformed subject claim", "INVALID_SUBJECT"))?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use chrono::Duration;
    use colab_auth::JwtClaims;
    use tower::ServiceExt;

    async fn protected_handler(axum::Extension(user): axum::Extension<AuthUser>) -> Json<AuthUser> {
        Json(user)
    }

    fn create_test_app(jwt_secret: &[u8]) -> Router {
        let jwt_state = Arc::new(JwtState::new(jwt_secret));

        Router::new()
            .route("/protected", get(protected_handler))
            .layer(middleware::from_fn_with_state(
                jwt_state.clone(),
                require_auth,
            ))
            .with_state(jwt_state)
    }

    #[tokio::test]
    async fn test_valid_session_token_via_bearer() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let user_id = Uuid::new_v4();
        let claims = JwtClaims::session(user_id, Duration::hours(1));
        let token = JwtValidator::encode(jwt_secret, &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let auth_user: AuthUser = serde_json::from_slice(&body).unwrap();

        assert_eq!(auth_user.user_id, user_id);
    }

    #[tokio::test]
    async fn test_valid_session_token_via_cookie() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let user_id = Uuid::new_v4();
        let claims = JwtClaims::session(user_id, Duration::hours(1));
        let token = JwtValidator::encode(jwt_secret, &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Cookie", format!("session_token={token}; theme=dark"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token() {
        let app = create_test_app(b"test-secret-key");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert!(error.error.contains("Missing authentication token"));
    }

    #[tokio::test]
    async fn test_invalid_bearer_format() {
        let app = create_test_app(b"test-secret-key");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", "InvalidFormat token123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert!(error.error.contains("Invalid Authorization header format"));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let claims = JwtClaims::session(Uuid::new_v4(), Duration::seconds(-10));
        let token = JwtValidator::encode(jwt_secret, &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert!(error.error.contains("Invalid or expired token"));
    }

    #[tokio::test]
    async fn test_wrong_secret() {
        let app = create_test_app(b"test-secret-key");

        let claims = JwtClaims::session(Uuid::new_v4(), Duration::hours(1));
        let token = JwtValidator::encode(b"wrong-secret-key", &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_session_token_type_rejected() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let mut claims = JwtClaims::session(Uuid::new_v4(), Duration::hours(1));
        claims.token_type = "refresh".to_string();
        let token = JwtValidator::encode(jwt_secret, &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert!(error.error.contains("Invalid token type"));
    }
}
