//! Association endpoints
//!
//! - POST /create/ - validate presence, insert, return the new id
//! - GET  /all/    - every record in insertion order
//!
//! Create accepts JSON or form-encoded bodies. Any other verb on either
//! path answers 405 with the JSON envelope.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::AssociationPayload;
use crate::http::server::AppState;
use crate::models::{Association, NewAssociation};

/// Create association response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

/// Association as exposed over HTTP
#[derive(Debug, Serialize)]
pub struct AssociationResponse {
    pub id: i32,
    pub email: String,
    pub deal_id: String,
}

impl From<Association> for AssociationResponse {
    fn from(a: Association) -> Self {
        Self {
            id: a.id,
            email: a.email,
            deal_id: a.deal_id,
        }
    }
}

/// List associations response
#[derive(Debug, Serialize)]
pub struct AssociationListResponse {
    pub success: bool,
    pub associations: Vec<AssociationResponse>,
}

/// POST /create/ - create a new association
async fn create_association(
    State(state): State<Arc<AppState>>,
    payload: AssociationPayload,
) -> Result<Json<CreatedResponse>, ApiError> {
    tracing::debug!(email = ?payload.email, deal_id = ?payload.deal_id, "Create association request");

    let new = NewAssociation::from_json(payload.email.as_ref(), payload.deal_id.as_ref())?;
    let association = state.associations.create(&new).await?;
    tracing::info!(id = association.id, "Association created");

    Ok(Json(CreatedResponse {
        success: true,
        id: association.id,
    }))
}

/// GET /all/ - list every association
async fn list_associations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AssociationListResponse>, ApiError> {
    let associations = state
        .associations
        .list()
        .await
        .map_err(ApiError::ListUnavailable)?;

    Ok(Json(AssociationListResponse {
        success: true,
        associations: associations
            .into_iter()
            .map(AssociationResponse::from)
            .collect(),
    }))
}

/// Fallback for verbs a route does not serve
async fn invalid_method() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Association routes, mounted by the server under each API group
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create/", post(create_association).fallback(invalid_method))
        .route("/all/", get(list_associations).fallback(invalid_method))
}
