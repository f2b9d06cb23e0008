//! Store Selector Storefront library.
//!
//! Lets a visitor pick which store they browse, remembers the choice in a
//! cookie, and resolves "the store for this request" for the rest of the
//! platform. Exposed as a library so the router can be tested and embedded.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod blocks;
pub mod config;
pub mod cookie;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{Router, extract::Request, middleware::from_fn};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary, outermost.
pub fn app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer =
        middleware::create_session_layer(session_store, state.config().cookie.secure);

    routes::routes()
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
