//! Error taxonomy
//!
//! Store failures pass through untouched, except unique-constraint hits on
//! tag names which are surfaced as `UniquenessViolation`.

use thiserror::Error;

/// Common result type for tag operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised by domain validation or the backing store
#[derive(Debug, Error)]
pub enum DomainError {
    /// Tag name is missing or blank
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Another row already holds this normalized name
    #[error("Tag name has already been taken: {0}")]
    UniquenessViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database not initialized")]
    NotInitialized,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other failure reported by SQLite
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl DomainError {
    /// Classify a store error raised while writing `name`.
    pub(crate) fn from_store(err: rusqlite::Error, name: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                DomainError::UniquenessViolation(name.to_string())
            }
            _ => DomainError::Store(err),
        }
    }

    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, DomainError::UniquenessViolation(_))
    }
}
