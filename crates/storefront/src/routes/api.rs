//! JSON API for other platform components.
//!
//! `/api/stores/current` is how the rest of the platform asks which store a
//! request belongs to; it runs the same resolver chain as the form.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use store_selector_core::Store;

use crate::error::Result;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Store list response.
#[derive(Debug, Serialize)]
pub struct StoreListResponse {
    pub stores: Vec<Store>,
}

/// Current store response. `store` is `null` when nothing resolved.
#[derive(Debug, Serialize)]
pub struct CurrentStoreResponse {
    pub store: Option<Store>,
}

/// List all stores in insertion order.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<StoreListResponse>> {
    let stores = state.directory().list().await?;
    Ok(Json(StoreListResponse { stores }))
}

/// Resolve the store for this request.
#[instrument(skip(state, visitor))]
pub async fn current(
    State(state): State<AppState>,
    visitor: Visitor,
) -> Result<Json<CurrentStoreResponse>> {
    let store = state.current_store().get_store(&visitor).await?;
    Ok(Json(CurrentStoreResponse { store }))
}
