//! Credential verification for CoLab Connect
//!
//! Argon2id password hashing and JWT session token issuance/validation.
//! The API layer consumes this crate; nothing here touches the database.

pub mod jwt;
pub mod password;

pub use jwt::{AuthError, JwtClaims, JwtValidator, SESSION_TOKEN_TYPE};
pub use password::{hash_password, verify_password, PasswordError};
