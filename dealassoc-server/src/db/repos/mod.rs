//! Repository implementations for association storage
//!
//! Handlers only see `AssociationRepository`. The Postgres repository is
//! the production store; the in-memory one backs tests and local runs.

pub mod associations;
pub mod memory;

use async_trait::async_trait;

use super::StorageError;
use crate::models::{Association, NewAssociation};

pub use associations::{PgAssociationRepository, DEFAULT_MAX_CONNECTIONS};
pub use memory::MemoryAssociationRepository;

/// Storage contract for association records
#[async_trait]
pub trait AssociationRepository: Send + Sync {
    /// Insert a record, returning it with its assigned id.
    ///
    /// Fails with `StorageError::ConstraintViolation` when the email exists.
    async fn create(&self, new: &NewAssociation) -> Result<Association, StorageError>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Association>, StorageError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StorageError>;
}
