//! Store entity.

use serde::{Deserialize, Serialize};

use super::StoreId;

/// A store (storefront context) a visitor can browse.
///
/// Stores are owned by the commerce platform; the selector only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Store {
    /// Stable store identifier.
    pub id: StoreId,
    /// Display name shown in the store select control.
    pub name: String,
}

impl Store {
    /// Create a store from an ID and display name.
    #[must_use]
    pub fn new(id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl core::fmt::Display for Store {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (id: {})", self.name, self.id)
    }
}
