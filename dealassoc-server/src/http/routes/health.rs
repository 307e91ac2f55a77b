//! Health check endpoint
//!
//! Reports the crate version and whether the store answers a ping.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
}

/// GET /health - 503 when the store is unreachable
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, storage) = match state.associations.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "connected"),
        Err(e) => {
            tracing::warn!("Health check: storage unavailable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            storage,
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::db::{AssociationRepository, MemoryAssociationRepository, StorageError};
    use crate::models::{Association, NewAssociation};

    struct DownRepository;

    #[async_trait]
    impl AssociationRepository for DownRepository {
        async fn create(&self, _new: &NewAssociation) -> Result<Association, StorageError> {
            Err(StorageError::Backend("down".into()))
        }

        async fn list(&self) -> Result<Vec<Association>, StorageError> {
            Err(StorageError::Backend("down".into()))
        }

        async fn ping(&self) -> Result<(), StorageError> {
            Err(StorageError::Backend("down".into()))
        }
    }

    #[tokio::test]
    async fn health_returns_ok_for_reachable_store() {
        let state = Arc::new(AppState::new(MemoryAssociationRepository::new()));
        let (code, Json(body)) = health(State(state)).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.storage, "connected");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn health_is_503_when_store_unreachable() {
        let state = Arc::new(AppState::new(DownRepository));
        let (code, Json(body)) = health(State(state)).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.storage, "unavailable");
    }
}
