//! Store select form.
//!
//! A single-step form: render a drop-down of every store, pre-selected per
//! the selection precedence, and on submit write the choice to the selection
//! cookie.

use serde::Deserialize;
use tower_sessions::cookie::Cookie;
use tracing::instrument;

use store_selector_core::{SelectionInputs, Store, StoreId, preselect_store};

use crate::cookie::selection_cookie;
use crate::error::{AppError, Result};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Form path; submissions post back here and redirect here by default.
pub const FORM_PATH: &str = "/stores/select";

/// Shown instead of the select control when there is nothing to switch between.
pub const NOT_ENOUGH_STORES_MESSAGE: &str =
    "At least two stores are needed to switch between stores.";

/// Submit button label.
pub const SUBMIT_LABEL: &str = "Switch!";

/// One entry of the select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOption {
    pub id: StoreId,
    pub name: String,
    pub selected: bool,
}

/// Render data for the store select form.
#[derive(Debug, Clone)]
pub struct StoreSelectView {
    /// Options in insertion order.
    pub options: Vec<StoreOption>,
    /// Informational message for directories with fewer than two stores.
    pub message: Option<&'static str>,
    /// Store returned by the current-store service.
    pub resolved: Option<Store>,
    /// Store named by the selection cookie, if it exists.
    pub from_cookie: Option<Store>,
    /// Where to send the visitor after submitting.
    pub destination: String,
    pub submit_label: &'static str,
    pub action: &'static str,
}

impl StoreSelectView {
    /// Whether the select control is rendered.
    #[must_use]
    pub const fn has_choice(&self) -> bool {
        self.message.is_none()
    }

    /// The pre-selected store, if any.
    #[must_use]
    pub fn selected(&self) -> Option<StoreId> {
        self.options.iter().find(|o| o.selected).map(|o| o.id)
    }
}

/// Store select form submission.
#[derive(Debug, Deserialize)]
pub struct StoreSelectSubmission {
    #[serde(default)]
    pub store_id: String,
    #[serde(default)]
    pub destination: Option<String>,
}

/// Build the store select form for this visitor.
///
/// Starts an anonymous session first so the selection cookie written on
/// submit lands in a session-bearing response. Session failures are logged
/// and do not fail the render.
///
/// # Errors
///
/// Returns an error if the store directory cannot be read.
#[instrument(skip(state, visitor))]
pub async fn build(
    state: &AppState,
    visitor: &mut Visitor,
    destination: Option<&str>,
) -> Result<StoreSelectView> {
    if let Err(e) = visitor.ensure_session().await {
        tracing::warn!(error = %e, "Failed to start visitor session");
    }

    let stores = state.directory().list().await?;
    let resolved = state.current_store().get_store(visitor).await?;
    let default = state.directory().load_default().await?;
    let from_cookie = visitor
        .cookie_store_id()
        .and_then(|id| stores.iter().find(|store| store.id == id))
        .cloned();

    let preselection = preselect_store(&SelectionInputs {
        stores: &stores,
        cookie: visitor.cookie_store_id(),
        current: resolved.as_ref(),
        default: default.as_ref(),
    });
    if let Some(p) = preselection {
        tracing::debug!(store_id = %p.store_id, source = p.source.as_str(), "Store pre-selected");
    }

    let message = if stores.len() < 2 {
        tracing::warn!(store_count = stores.len(), "Store select form rendered without a choice");
        Some(NOT_ENOUGH_STORES_MESSAGE)
    } else {
        None
    };

    let selected = preselection.map(|p| p.store_id);
    let options = stores
        .into_iter()
        .map(|store| StoreOption {
            selected: Some(store.id) == selected,
            id: store.id,
            name: store.name,
        })
        .collect();

    Ok(StoreSelectView {
        options,
        message,
        resolved,
        from_cookie,
        destination: local_destination(destination).to_string(),
        submit_label: SUBMIT_LABEL,
        action: FORM_PATH,
    })
}

/// Validate a submission and build the selection cookie for it.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the store ID does not parse or names no
/// known store, and a directory error if the lookup fails.
#[instrument(skip(state))]
pub async fn submit(
    state: &AppState,
    submission: &StoreSelectSubmission,
) -> Result<(Store, Cookie<'static>)> {
    let store_id = StoreId::parse(&submission.store_id)
        .map_err(|e| AppError::BadRequest(format!("invalid store_id: {e}")))?;

    let store = state
        .directory()
        .get(store_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("unknown store {store_id}")))?;

    let cookie = selection_cookie(&state.config().cookie, store.id);
    tracing::info!(store_id = %store.id, store = %store.name, "Visitor switched store");

    Ok((store, cookie))
}

/// Only same-site absolute paths are honoured as redirect targets.
#[must_use]
pub fn local_destination(destination: Option<&str>) -> &str {
    match destination {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => FORM_PATH,
    }
}
