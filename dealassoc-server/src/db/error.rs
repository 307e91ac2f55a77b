//! Storage error type
//!
//! `Display` is the store's own message. The HTTP layer hands it back to
//! callers verbatim.

use sqlx::error::DatabaseError;

/// Failure raised by an association repository
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Unique constraint rejected the insert (duplicate email)
    #[error("{message}")]
    ConstraintViolation {
        constraint: Option<String>,
        message: String,
    },

    /// Any other sqlx failure
    #[error("{0}")]
    Database(sqlx::Error),

    /// Failure from a non-sqlx backend
    #[error("{0}")]
    Backend(String),
}

impl StorageError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    fn from_database(err: &dyn DatabaseError) -> Option<Self> {
        err.is_unique_violation().then(|| Self::ConstraintViolation {
            constraint: err.constraint().map(str::to_owned),
            message: err.message().to_owned(),
        })
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if let Some(violation) = Self::from_database(&**db) {
                return violation;
            }
        }
        Self::Database(e)
    }
}
