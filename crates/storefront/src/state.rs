//! Application state shared across handlers.

use std::sync::Arc;

use crate::blocks::BlockRegistry;
use crate::config::StoreSelectConfig;
use crate::db::StoreDirectory;
use crate::resolver::{ChainStoreResolver, CurrentStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreSelectConfig,
    directory: Arc<dyn StoreDirectory>,
    current_store: CurrentStore,
    blocks: BlockRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The current-store resolver chain is registered from
    /// `config.resolvers`, and the built-in blocks are registered.
    #[must_use]
    pub fn new(config: StoreSelectConfig, directory: Arc<dyn StoreDirectory>) -> Self {
        let chain = ChainStoreResolver::from_kinds(&config.resolvers, &directory);
        tracing::info!(resolvers = ?chain.names(), "Current-store resolver chain registered");

        Self {
            inner: Arc::new(AppStateInner {
                config,
                directory,
                current_store: CurrentStore::new(chain),
                blocks: BlockRegistry::builtin(),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreSelectConfig {
        &self.inner.config
    }

    /// Get the store directory.
    #[must_use]
    pub fn directory(&self) -> &dyn StoreDirectory {
        self.inner.directory.as_ref()
    }

    /// Get the current-store service.
    #[must_use]
    pub fn current_store(&self) -> &CurrentStore {
        &self.inner.current_store
    }

    /// Get the block registry.
    #[must_use]
    pub fn blocks(&self) -> &BlockRegistry {
        &self.inner.blocks
    }
}
