//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Rely on DB constraints for email uniqueness, no check-then-insert
//! - Repositories are injected through `AssociationRepository`

pub mod error;
pub mod migrations;
pub mod repos;

pub use error::StorageError;
pub use repos::*;
