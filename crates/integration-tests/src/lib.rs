//! Integration tests for the store selector.
//!
//! These run against a live server backed by `PostgreSQL` with at least two
//! rows in `commerce_store`, so they are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p store-selector-storefront
//! STORE_SELECT_BASE_URL=http://localhost:3000 \
//!     cargo test -p store-selector-integration-tests -- --ignored
//! ```

use reqwest::{Client, redirect};
use serde::Deserialize;

use store_selector_core::Store;

/// Base URL of the running server (`STORE_SELECT_BASE_URL`).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STORE_SELECT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A browser-like client: keeps cookies, does not follow redirects.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn browser() -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
}

#[derive(Debug, Deserialize)]
struct StoreList {
    stores: Vec<Store>,
}

#[derive(Debug, Deserialize)]
struct CurrentStore {
    store: Option<Store>,
}

/// Fetch `/api/stores`.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a store list.
pub async fn list_stores(client: &Client) -> reqwest::Result<Vec<Store>> {
    let list: StoreList = client
        .get(format!("{}/api/stores", base_url()))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(list.stores)
}

/// Fetch `/api/stores/current` with whatever cookies the client holds.
///
/// # Errors
///
/// Returns an error if the request fails or the body is malformed.
pub async fn current_store(client: &Client) -> reqwest::Result<Option<Store>> {
    let current: CurrentStore = client
        .get(format!("{}/api/stores/current", base_url()))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(current.store)
}
