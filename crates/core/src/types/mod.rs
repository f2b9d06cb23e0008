//! Core types for the store selector.
//!
//! This module provides type-safe wrappers for the store selection domain.

pub mod account;
pub mod id;
pub mod store;

pub use account::{Account, Permission};
pub use id::*;
pub use store::Store;
