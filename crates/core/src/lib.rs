//! Store Selector Core - Shared types library.
//!
//! This crate provides the types used by the store selector service:
//! - `storefront` - Store selection form, block and current-store resolver
//! - `integration-tests` - End-to-end checks against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Store loading and request handling live in the storefront.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, stores, accounts and permissions
//! - [`selection`] - Pre-selection precedence for the store select form

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod selection;
pub mod types;

pub use selection::{Preselection, SelectionInputs, SelectionSource, preselect_store};
pub use types::*;
