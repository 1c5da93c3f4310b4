//! Allow-list store
//!
//! Persistence layer for the allowed role set.
//! Keeps the set in memory and mirrors it to a JSON file on every change.

mod error;
mod repository;

pub use error::StoreError;
pub use repository::{AllowedRoleStore, AllowedRolesDocument, LoadOutcome};
