//! Domain models.
//!
//! Internal types, distinct from the request/response shapes in
//! `wedding_api::models`.

pub mod auth;
pub mod planning;
pub mod user;
pub mod wedding;
