//! Request-scoped visitor context.
//!
//! A [`Visitor`] is built once per request from the session, the selection
//! cookie and the configured anonymous permissions. It owns the two pieces of
//! per-request state the store selector needs:
//!
//! - the "session started" flag, so an anonymous session is started at most
//!   once per request
//! - the memoised current-store resolution, so resolving twice in one
//!   request yields the same store

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tokio::sync::OnceCell;
use tower_sessions::Session;

use store_selector_core::{Account, Store, StoreId};

use crate::cookie;
use crate::models::session_keys;
use crate::state::AppState;

/// The visitor making the current request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>, visitor: Visitor) -> impl IntoResponse {
///     let store = state.current_store().get_store(&visitor).await?;
///     // ...
/// }
/// ```
pub struct Visitor {
    account: Account,
    cookie_store_id: Option<StoreId>,
    session: Option<Session>,
    session_started: bool,
    resolved: OnceCell<Option<Store>>,
}

impl Visitor {
    /// Create a visitor context.
    #[must_use]
    pub fn new(account: Account, cookie_store_id: Option<StoreId>, session: Option<Session>) -> Self {
        Self {
            account,
            cookie_store_id,
            session,
            session_started: false,
            resolved: OnceCell::new(),
        }
    }

    /// The account making the request.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    /// Store ID from the selection cookie, if it holds a usable value.
    #[must_use]
    pub const fn cookie_store_id(&self) -> Option<StoreId> {
        self.cookie_store_id
    }

    /// Whether this request started a session for the visitor.
    #[must_use]
    pub const fn session_started(&self) -> bool {
        self.session_started
    }

    /// Memoised current-store resolution for this request.
    pub(crate) const fn resolution(&self) -> &OnceCell<Option<Store>> {
        &self.resolved
    }

    /// Start a session for an anonymous visitor who has none yet.
    ///
    /// Writing a session value makes the session layer issue its cookie on
    /// this response. Runs at most once per request; returns whether a
    /// session was started by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn ensure_session(&mut self) -> Result<bool, tower_sessions::session::Error> {
        if self.session_started || !self.account.is_anonymous() {
            return Ok(false);
        }
        let Some(session) = &self.session else {
            return Ok(false);
        };
        if session.id().is_some() {
            return Ok(false);
        }

        session.insert(session_keys::SESSION_STARTED, true).await?;
        self.session_started = true;
        tracing::debug!("Started session for anonymous visitor");
        Ok(true)
    }
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned();

        let account = match &session {
            Some(session) => session
                .get::<Account>(session_keys::CURRENT_ACCOUNT)
                .await
                .ok()
                .flatten(),
            None => None,
        }
        .unwrap_or_else(|| Account::anonymous(state.config().anonymous_permissions.clone()));

        let cookie_store_id = cookie::read_store_id(&parts.headers, &state.config().cookie.name);

        Ok(Self::new(account, cookie_store_id, session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use store_selector_core::{AccountId, Permission};
    use tower_sessions::MemoryStore;

    use super::*;

    fn fresh_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_ensure_session_starts_once() {
        let session = fresh_session();
        let mut visitor = Visitor::new(
            Account::anonymous([Permission::access_content()]),
            None,
            Some(session.clone()),
        );

        assert!(visitor.ensure_session().await.unwrap());
        assert!(visitor.session_started());
        assert!(!visitor.ensure_session().await.unwrap());

        let marker: Option<bool> = session.get(session_keys::SESSION_STARTED).await.unwrap();
        assert_eq!(marker, Some(true));
    }

    #[tokio::test]
    async fn test_ensure_session_skips_authenticated_accounts() {
        let mut visitor = Visitor::new(
            Account::authenticated(AccountId::new(1), []),
            None,
            Some(fresh_session()),
        );
        assert!(!visitor.ensure_session().await.unwrap());
        assert!(!visitor.session_started());
    }

    #[tokio::test]
    async fn test_ensure_session_without_session_layer() {
        let mut visitor = Visitor::new(Account::anonymous([]), None, None);
        assert!(!visitor.ensure_session().await.unwrap());
    }
}
