//! Cookie-based store resolver.

use std::sync::Arc;

use async_trait::async_trait;

use store_selector_core::Store;

use super::{ResolveError, StoreResolver};
use crate::db::StoreDirectory;
use crate::middleware::Visitor;

/// Returns the store whose ID is set in the selection cookie.
pub struct CookieStoreResolver {
    directory: Arc<dyn StoreDirectory>,
}

impl CookieStoreResolver {
    /// Create a resolver that loads stores from the given directory.
    #[must_use]
    pub fn new(directory: Arc<dyn StoreDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl StoreResolver for CookieStoreResolver {
    fn name(&self) -> &'static str {
        "cookie"
    }

    async fn resolve(&self, visitor: &Visitor) -> Result<Option<Store>, ResolveError> {
        let Some(store_id) = visitor.cookie_store_id() else {
            return Ok(None);
        };

        let store = self.directory.get(store_id).await?;
        if store.is_none() {
            tracing::debug!(%store_id, "Selection cookie names an unknown store");
        }
        Ok(store)
    }
}
