//! Store selection route handlers.
//!
//! The select page always renders from the live cookie and resolver state,
//! so responses are marked `no-store`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::header::{CACHE_CONTROL, SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::cookie::set_cookie_header;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::services::store_select::{self, local_destination};
use crate::services::{StoreSelectSubmission, StoreSelectView};
use crate::state::AppState;

/// Store select page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/select.html")]
pub struct StoreSelectPageTemplate {
    pub form: StoreSelectView,
}

/// Query parameters for the select page.
#[derive(Debug, Deserialize)]
pub struct SelectPageQuery {
    /// Local path to return to after switching.
    pub destination: Option<String>,
}

/// Display the store select page.
#[instrument(skip(state, visitor))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<SelectPageQuery>,
    mut visitor: Visitor,
) -> Result<Response> {
    let form = store_select::build(&state, &mut visitor, query.destination.as_deref()).await?;

    Ok(([(CACHE_CONTROL, "no-store")], StoreSelectPageTemplate { form }).into_response())
}

/// Switch store.
///
/// Writes the selection cookie and redirects (303) to the submitted local
/// destination, or back to the select page.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<StoreSelectSubmission>,
) -> Result<Response> {
    let (store, cookie) = store_select::submit(&state, &form).await?;
    add_breadcrumb(
        "store_select",
        "Switched store",
        &[("store_id", &store.id.to_string())],
    );

    let header = set_cookie_header(&cookie)
        .ok_or_else(|| AppError::Internal("selection cookie is not a valid header".to_string()))?;
    let destination = local_destination(form.destination.as_deref());

    Ok((AppendHeaders([(SET_COOKIE, header)]), Redirect::to(destination)).into_response())
}
