//! In-memory store directory.

use async_trait::async_trait;

use store_selector_core::{Store, StoreId};

use super::{DirectoryError, StoreDirectory};

/// A fixed, ordered list of stores with an optional default.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreDirectory {
    stores: Vec<Store>,
    default_id: Option<StoreId>,
}

impl InMemoryStoreDirectory {
    /// Create a directory from stores in insertion order.
    #[must_use]
    pub fn new(stores: Vec<Store>) -> Self {
        Self {
            stores,
            default_id: None,
        }
    }

    /// Mark a store as the platform default.
    ///
    /// An ID that is not in the directory leaves no default configured.
    #[must_use]
    pub fn with_default(mut self, id: StoreId) -> Self {
        self.default_id = Some(id);
        self
    }

    fn find(&self, id: StoreId) -> Option<Store> {
        self.stores.iter().find(|store| store.id == id).cloned()
    }
}

#[async_trait]
impl StoreDirectory for InMemoryStoreDirectory {
    async fn list(&self) -> Result<Vec<Store>, DirectoryError> {
        Ok(self.stores.clone())
    }

    async fn get(&self, id: StoreId) -> Result<Option<Store>, DirectoryError> {
        Ok(self.find(id))
    }

    async fn load_default(&self) -> Result<Option<Store>, DirectoryError> {
        Ok(self.default_id.and_then(|id| self.find(id)))
    }
}
