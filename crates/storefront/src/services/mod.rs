//! Business logic services for the store selector.
//!
//! # Services
//!
//! - `store_select` - Build and submit the store select form

pub mod store_select;

pub use store_select::{StoreOption, StoreSelectSubmission, StoreSelectView};
