//! Domain models for the store selector.

pub mod session;

pub use session::keys as session_keys;
