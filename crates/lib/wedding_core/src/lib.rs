//! # wedding_core
//!
//! Core domain logic for the wedding planner: accounts, credentials,
//! identity tokens and wedding records.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;
pub mod weddings;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
