//! JWT session token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Issuer claim stamped on every token
pub const ISSUER: &str = "colab-connect";
/// Audience claim for browser/API sessions
pub const AUDIENCE: &str = "colab-connect-web";
/// The only token type the API middleware accepts
pub const SESSION_TOKEN_TYPE: &str = "session";

/// Errors produced while issuing or validating tokens
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token failed signature or structural validation
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token is past its expiration time
    #[error("Token expired")]
    TokenExpired,

    /// Token could not be encoded
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Claims carried by a CoLab Connect session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    /// Subject (user UUID)
    pub sub: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Custom: token type ("session")
    pub token_type: String,
}

impl JwtClaims {
    /// Build session claims for a user, valid for `validity` from now
    pub fn session(user_id: Uuid, validity: Duration) -> Self {
        let now = Utc::now();
        let exp = now + validity;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Parse the subject claim back into a user id
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::InvalidToken(format!("Malformed subject claim: {e}")))
    }
}

/// Validates (and encodes) HS256 session tokens
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode claims into a signed token
    pub fn encode(secret: &[u8], claims: &JwtClaims) -> Result<String, AuthError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| AuthError::EncodingFailed(e.to_string()))
    }

    /// Validate a token's signature, issuer, audience and expiration
    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key";

    #[test]
    fn test_session_token_round_trip() {
        let user_id = Uuid::new_v4();
        let claims = JwtClaims::session(user_id, Duration::hours(1));

        let token = JwtValidator::encode(SECRET, &claims).unwrap();
        let validator = JwtValidator::new(SECRET);
        let decoded = validator.validate(&token).unwrap();

        assert_eq!(decoded, claims);
        assert_eq!(decoded.user_id().unwrap(), user_id);
        assert_eq!(decoded.token_type, SESSION_TOKEN_TYPE);
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = JwtClaims::session(Uuid::new_v4(), Duration::seconds(-10));
        let token = JwtValidator::encode(SECRET, &claims).unwrap();

        let validator = JwtValidator::new(SECRET);
        let result = validator.validate(&token);

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = JwtClaims::session(Uuid::new_v4(), Duration::hours(1));
        let token = JwtValidator::encode(b"other-secret", &claims).unwrap();

        let validator = JwtValidator::new(SECRET);
        assert!(matches!(
            validator.validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut claims = JwtClaims::session(Uuid::new_v4(), Duration::hours(1));
        claims.iss = "someone-else".to_string();
        let token = JwtValidator::encode(SECRET, &claims).unwrap();

        let validator = JwtValidator::new(SECRET);
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_malformed_subject_claim() {
        let mut claims = JwtClaims::session(Uuid::new_v4(), Duration::hours(1));
        claims.sub = "not-a-uuid".to_string();

        assert!(matches!(
            claims.user_id(),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
