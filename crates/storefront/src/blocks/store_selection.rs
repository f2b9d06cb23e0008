//! Store selection block.

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;

use store_selector_core::{Account, Permission};

use super::Block;
use crate::error::Result;
use crate::middleware::Visitor;
use crate::services::{StoreSelectView, store_select};
use crate::state::AppState;

/// Store select form fragment.
#[derive(Template)]
#[template(path = "partials/store_select_form.html")]
pub struct StoreSelectFormTemplate {
    pub form: StoreSelectView,
}

/// Embeds the store select form, for accounts with `access content`.
pub struct StoreSelectionBlock;

impl StoreSelectionBlock {
    pub const ID: &'static str = "store_selection";

    /// Block constructor for the registry.
    #[must_use]
    pub fn create() -> Arc<dyn Block> {
        Arc::new(Self)
    }
}

#[async_trait]
impl Block for StoreSelectionBlock {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn admin_label(&self) -> &'static str {
        "Select store"
    }

    fn access(&self, account: &Account) -> bool {
        account.has_permission(Permission::ACCESS_CONTENT)
    }

    async fn build(&self, state: &AppState, visitor: &mut Visitor) -> Result<String> {
        let form = store_select::build(state, visitor, None).await?;
        Ok(StoreSelectFormTemplate { form }.render()?)
    }
}
