//! Error taxonomy for domain operations

use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by domain operations
///
/// The API layer maps these onto HTTP statuses: NotFound → 404,
/// Forbidden → 403, Conflict and CapacityExceeded → 400, Database → 500.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The addressed entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// The actor is not allowed to perform this operation
    #[error("{0}")]
    Forbidden(String),

    /// The operation conflicts with current state or carries invalid input
    #[error("{0}")]
    Conflict(String),

    /// Accepting would push the project past its member limit
    #[error("{0}")]
    CapacityExceeded(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CoreResult<T> = Result<T, CoreError>;
