//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing and timeout
//! - Graceful shutdown
//! - JSON `{success, ...}` envelopes for every response

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use extractors::AssociationPayload;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
