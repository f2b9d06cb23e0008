//! Accounts and permissions.
//!
//! Authentication itself belongs to the hosting platform. The selector only
//! needs to know whether an account is anonymous and which permissions it
//! holds, so the block access check can run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::AccountId;

/// A named permission, e.g. `access content`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Basic permission required to see the store selection block.
    pub const ACCESS_CONTENT: &'static str = "access content";

    /// Create a permission from its name. Surrounding whitespace is ignored.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_owned())
    }

    /// The `access content` permission.
    #[must_use]
    pub fn access_content() -> Self {
        Self::new(Self::ACCESS_CONTENT)
    }

    /// Get the permission name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The account making a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// `None` for anonymous visitors.
    pub id: Option<AccountId>,
    /// Permissions granted to this account.
    pub permissions: BTreeSet<Permission>,
}

impl Account {
    /// An anonymous visitor holding the given permissions.
    #[must_use]
    pub fn anonymous(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id: None,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// An authenticated account.
    #[must_use]
    pub fn authenticated(id: AccountId, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id: Some(id),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Whether this account is anonymous.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }

    /// Whether this account holds the named permission.
    #[must_use]
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.as_str() == name)
    }
}
