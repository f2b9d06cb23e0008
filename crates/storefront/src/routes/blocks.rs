//! Block fragment handlers.

use axum::{
    extract::{Path, State},
    http::header::CACHE_CONTROL,
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Render a block fragment.
///
/// Visitors without access get an empty `200`; unknown blocks are `404`.
#[instrument(skip(state, visitor))]
pub async fn show(
    State(state): State<AppState>,
    Path(block_id): Path<String>,
    mut visitor: Visitor,
) -> Result<Response> {
    let html = state
        .blocks()
        .render(&block_id, &state, &mut visitor)
        .await?;

    Ok(([(CACHE_CONTROL, "no-store")], Html(html)).into_response())
}
