//! HTTP route handlers for the store selector.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (store directory reachable)
//!
//! # Store selection
//! GET  /stores/select          - Store select page
//! POST /stores/select          - Switch store (sets cookie, 303 redirect)
//!
//! # Blocks (HTML fragments)
//! GET  /blocks/{block_id}      - Rendered block, empty without access
//!
//! # API
//! GET  /api/stores             - All stores in insertion order
//! GET  /api/stores/current     - Store resolved for this request
//! ```

pub mod api;
pub mod blocks;
pub mod health;
pub mod stores;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the store API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api::list))
        .route("/current", get(api::current))
}

/// Create all routes for the store selector.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/stores/select", get(stores::show).post(stores::submit))
        .route("/blocks/{block_id}", get(blocks::show))
        .nest("/api/stores", api_routes())
}

#[cfg(test)]
mod tests;
