//! Session-related types.
//!
//! The hosting platform authenticates visitors and stores the account in the
//! session; the selector only reads it back.

/// Session keys used by the store selector.
pub mod keys {
    /// Key for the authenticated account (written by the hosting platform).
    pub const CURRENT_ACCOUNT: &str = "current_account";

    /// Marker written when the store select form starts a session for an
    /// anonymous visitor, so the session cookie is issued.
    pub const SESSION_STARTED: &str = "session_started";
}
