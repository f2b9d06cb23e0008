//! Shared fixtures for unit tests.

use std::sync::Arc;

use axum::Router;
use secrecy::SecretString;
use tower_sessions::MemoryStore;

use store_selector_core::Permission;

use crate::config::{CookieConfig, ResolverKind, StoreSelectConfig};
use crate::db::InMemoryStoreDirectory;
use crate::state::AppState;

/// Configuration with the default cookie and the `cookie,default` chain.
pub fn test_config() -> StoreSelectConfig {
    StoreSelectConfig {
        database_url: SecretString::from("postgres://localhost/test"),
        host: [127, 0, 0, 1].into(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        cookie: CookieConfig::default(),
        resolvers: vec![ResolverKind::Cookie, ResolverKind::Default],
        anonymous_permissions: vec![Permission::access_content()],
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Application state over an in-memory directory.
pub fn test_state(directory: InMemoryStoreDirectory) -> AppState {
    AppState::new(test_config(), Arc::new(directory))
}

/// Full router with in-memory sessions.
pub fn test_app(state: AppState) -> Router {
    crate::app(state, MemoryStore::default())
}
