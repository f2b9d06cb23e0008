//! `PostgreSQL` store directory.
//!
//! Reads the commerce platform's `commerce_store` table. Insertion order is
//! `store_id` ascending; the platform allocates IDs from a sequence.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use store_selector_core::{Store, StoreId};

use super::{DirectoryError, StoreDirectory};

/// Raw `commerce_store` row.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    store_id: i32,
    name: String,
}

impl TryFrom<StoreRow> for Store {
    type Error = DirectoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        if row.store_id <= 0 {
            return Err(DirectoryError::DataCorruption(format!(
                "non-positive store id {} in commerce_store",
                row.store_id
            )));
        }
        Ok(Self::new(StoreId::new(row.store_id), row.name))
    }
}

/// Store directory backed by the commerce database.
#[derive(Debug, Clone)]
pub struct PgStoreDirectory {
    pool: PgPool,
}

impl PgStoreDirectory {
    /// Create a new directory over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreDirectory for PgStoreDirectory {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Store>, DirectoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT store_id, name
            FROM commerce_store
            ORDER BY store_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Store::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: StoreId) -> Result<Option<Store>, DirectoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT store_id, name
            FROM commerce_store
            WHERE store_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Store::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn load_default(&self) -> Result<Option<Store>, DirectoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT store_id, name
            FROM commerce_store
            WHERE is_default
            ORDER BY store_id
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(Store::try_from).transpose()
    }
}
