//! Pre-selection precedence for the store select form.
//!
//! The form pre-selects exactly one store whenever the directory is non-empty:
//!
//! 1. the store named by the selection cookie
//! 2. the current store resolved by the resolver chain
//! 3. the platform default store
//! 4. the first store in insertion order
//!
//! A candidate only wins if it is present in the directory, so the control
//! never points at an option it does not render.

use crate::types::{Store, StoreId};

/// Which precedence level produced the pre-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Cookie,
    CurrentStore,
    DefaultStore,
    FirstStore,
}

impl SelectionSource {
    /// Short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::CurrentStore => "current_store",
            Self::DefaultStore => "default_store",
            Self::FirstStore => "first_store",
        }
    }
}

/// A pre-selected store and the level that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preselection {
    pub store_id: StoreId,
    pub source: SelectionSource,
}

/// Everything the precedence chain looks at.
#[derive(Debug, Clone, Copy)]
pub struct SelectionInputs<'a> {
    /// All stores, in insertion order.
    pub stores: &'a [Store],
    /// Store ID read from the selection cookie.
    pub cookie: Option<StoreId>,
    /// Result of the current-store service.
    pub current: Option<&'a Store>,
    /// Platform default store.
    pub default: Option<&'a Store>,
}

/// Pick the store the select control starts on.
///
/// Returns `None` only when the directory is empty.
#[must_use]
pub fn preselect_store(inputs: &SelectionInputs<'_>) -> Option<Preselection> {
    let known = |id: StoreId| inputs.stores.iter().any(|store| store.id == id);

    let candidates = [
        (inputs.cookie, SelectionSource::Cookie),
        (inputs.current.map(|s| s.id), SelectionSource::CurrentStore),
        (inputs.default.map(|s| s.id), SelectionSource::DefaultStore),
    ];

    candidates
        .into_iter()
        .find_map(|(id, source)| {
            id.filter(|id| known(*id))
                .map(|store_id| Preselection { store_id, source })
        })
        .or_else(|| {
            inputs.stores.first().map(|store| Preselection {
                store_id: store.id,
                source: SelectionSource::FirstStore,
            })
        })
}
