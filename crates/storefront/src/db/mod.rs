//! Store directory access.
//!
//! # Database: commerce platform
//!
//! Stores are owned by the commerce platform. This service only reads them:
//!
//! ## Tables
//!
//! - `commerce_store` - `store_id`, `name`, `is_default` (read-only)
//! - `tower_sessions.session` - Visitor sessions (created on startup by
//!   `tower-sessions-sqlx-store`)
//!
//! The [`StoreDirectory`] trait is the seam between request handling and
//! store storage. [`PgStoreDirectory`] reads the commerce database;
//! [`InMemoryStoreDirectory`] holds a fixed list.

mod memory;
mod stores;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use store_selector_core::{Store, StoreId};

pub use memory::InMemoryStoreDirectory;
pub use stores::PgStoreDirectory;

/// Errors from store directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Read access to the set of configured stores.
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    /// All stores, in insertion order.
    async fn list(&self) -> Result<Vec<Store>, DirectoryError>;

    /// Load a single store. Unknown IDs yield `Ok(None)`.
    async fn get(&self, id: StoreId) -> Result<Option<Store>, DirectoryError>;

    /// The platform-configured default store, if any.
    async fn load_default(&self) -> Result<Option<Store>, DirectoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
