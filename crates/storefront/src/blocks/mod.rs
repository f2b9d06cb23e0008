//! Embeddable page blocks.
//!
//! A block is a fragment the hosting page places in one of its regions. Each
//! block has a stable ID, an access check and a build step. Blocks are
//! registered in a [`BlockRegistry`] from a table of constructors:
//!
//! | ID                | Block                    |
//! |-------------------|--------------------------|
//! | `store_selection` | [`StoreSelectionBlock`]  |

mod store_selection;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use store_selector_core::Account;

use crate::error::{AppError, Result};
use crate::middleware::Visitor;
use crate::state::AppState;

pub use store_selection::{StoreSelectFormTemplate, StoreSelectionBlock};

/// A page block.
#[async_trait]
pub trait Block: Send + Sync {
    /// Stable block ID, used in `/blocks/{id}`.
    fn id(&self) -> &'static str;

    /// Human-readable label for block placement UIs.
    fn admin_label(&self) -> &'static str;

    /// Whether the account may see this block.
    fn access(&self, account: &Account) -> bool;

    /// Render the block's HTML.
    async fn build(&self, state: &AppState, visitor: &mut Visitor) -> Result<String>;
}

/// Creates a block instance.
pub type BlockConstructor = fn() -> Arc<dyn Block>;

/// Blocks shipped with the store selector.
const BUILTIN_BLOCKS: &[BlockConstructor] = &[StoreSelectionBlock::create];

/// Blocks available for embedding, by ID.
#[derive(Clone, Default)]
pub struct BlockRegistry {
    blocks: BTreeMap<&'static str, Arc<dyn Block>>,
}

impl BlockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in blocks.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_BLOCKS
            .iter()
            .fold(Self::new(), |mut registry, constructor| {
                registry.register(*constructor);
                registry
            })
    }

    /// Register a block. A later block with the same ID replaces the earlier one.
    pub fn register(&mut self, constructor: BlockConstructor) {
        let block = constructor();
        if self.blocks.insert(block.id(), block).is_some() {
            tracing::warn!("Block registered twice; keeping the latest");
        }
    }

    /// Look up a block by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Block>> {
        self.blocks.get(id)
    }

    /// Registered block IDs, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.blocks.keys().copied().collect()
    }

    /// Render a block for a visitor.
    ///
    /// A visitor without access gets an empty fragment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown IDs, or the block's build error.
    pub async fn render(&self, id: &str, state: &AppState, visitor: &mut Visitor) -> Result<String> {
        let block = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("block {id}")))?;

        if !block.access(visitor.account()) {
            tracing::debug!(block = id, "Block access denied");
            return Ok(String::new());
        }

        block.build(state, visitor).await
    }
}
