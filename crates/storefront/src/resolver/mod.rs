//! Current-store resolution.
//!
//! The platform answers "which store is this request for?" with an ordered
//! chain of [`StoreResolver`]s: the first one that produces a store wins.
//! [`CurrentStore`] wraps the chain and memoises its answer per request.
//!
//! Resolvers are registered explicitly, in priority order, from
//! `STORE_SELECT_RESOLVERS`:
//!
//! | Name      | Resolver                  |
//! |-----------|---------------------------|
//! | `cookie`  | [`CookieStoreResolver`]   |
//! | `default` | [`DefaultStoreResolver`]  |

mod cookie;
mod default;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use store_selector_core::Store;

use crate::config::ResolverKind;
use crate::db::{DirectoryError, StoreDirectory};
use crate::middleware::Visitor;

pub use cookie::CookieStoreResolver;
pub use default::DefaultStoreResolver;

/// Errors from store resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("store directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// A strategy that may produce the store for a request.
#[async_trait]
pub trait StoreResolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolve the store for this visitor, or `None` to defer to the next
    /// resolver in the chain.
    async fn resolve(&self, visitor: &Visitor) -> Result<Option<Store>, ResolveError>;
}

/// Ordered resolver chain. The first non-absent result wins.
#[derive(Clone, Default)]
pub struct ChainStoreResolver {
    resolvers: Vec<Arc<dyn StoreResolver>>,
}

impl ChainStoreResolver {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver after the ones already in the chain.
    #[must_use]
    pub fn with(mut self, resolver: Arc<dyn StoreResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Build the chain from configured resolver names.
    #[must_use]
    pub fn from_kinds(kinds: &[ResolverKind], directory: &Arc<dyn StoreDirectory>) -> Self {
        kinds.iter().fold(Self::new(), |chain, kind| match kind {
            ResolverKind::Cookie => {
                chain.with(Arc::new(CookieStoreResolver::new(Arc::clone(directory))))
            }
            ResolverKind::Default => {
                chain.with(Arc::new(DefaultStoreResolver::new(Arc::clone(directory))))
            }
        })
    }

    /// Names of the registered resolvers, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Run the chain.
    ///
    /// # Errors
    ///
    /// Returns the first resolver error; later resolvers are not consulted.
    pub async fn resolve(&self, visitor: &Visitor) -> Result<Option<Store>, ResolveError> {
        for resolver in &self.resolvers {
            if let Some(store) = resolver.resolve(visitor).await? {
                tracing::debug!(resolver = resolver.name(), store_id = %store.id, "Store resolved");
                return Ok(Some(store));
            }
        }
        Ok(None)
    }
}

/// The aggregate "current store" service.
#[derive(Clone, Default)]
pub struct CurrentStore {
    chain: ChainStoreResolver,
}

impl CurrentStore {
    /// Wrap a resolver chain.
    #[must_use]
    pub const fn new(chain: ChainStoreResolver) -> Self {
        Self { chain }
    }

    /// The store for this request.
    ///
    /// The chain runs at most once per request; later calls return the
    /// memoised answer.
    ///
    /// # Errors
    ///
    /// Returns an error if a resolver fails. Failures are not memoised.
    pub async fn get_store(&self, visitor: &Visitor) -> Result<Option<Store>, ResolveError> {
        visitor
            .resolution()
            .get_or_try_init(|| self.chain.resolve(visitor))
            .await
            .cloned()
    }
}
