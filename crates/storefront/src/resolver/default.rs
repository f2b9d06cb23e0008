//! Default-store resolver.

use std::sync::Arc;

use async_trait::async_trait;

use store_selector_core::Store;

use super::{ResolveError, StoreResolver};
use crate::db::StoreDirectory;
use crate::middleware::Visitor;

/// Returns the platform-configured default store.
///
/// Usually registered last so it only answers when nothing more specific did.
pub struct DefaultStoreResolver {
    directory: Arc<dyn StoreDirectory>,
}

impl DefaultStoreResolver {
    /// Create a resolver over the given directory.
    #[must_use]
    pub fn new(directory: Arc<dyn StoreDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl StoreResolver for DefaultStoreResolver {
    fn name(&self) -> &'static str {
        "default"
    }

    async fn resolve(&self, _visitor: &Visitor) -> Result<Option<Store>, ResolveError> {
        Ok(self.directory.load_default().await?)
    }
}
