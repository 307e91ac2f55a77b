//! dealassoc-server: HTTP service pairing contact emails with deal ids
//!
//! Two endpoints create and list association records stored in Postgres.
//! Storage is injected through [`AssociationRepository`] so the same
//! router runs against [`PgAssociationRepository`] in production and
//! [`MemoryAssociationRepository`] in tests.

pub mod db;
pub mod http;
pub mod models;

pub use db::{
    AssociationRepository, MemoryAssociationRepository, PgAssociationRepository, StorageError,
    DEFAULT_MAX_CONNECTIONS,
};
pub use http::{
    build_router, run_server, ApiError, AppState, AssociationPayload, ServerConfig, ServerError,
};
pub use models::{Association, NewAssociation, ValidationError};
