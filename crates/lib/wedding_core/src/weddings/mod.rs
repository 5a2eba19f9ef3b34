//! Wedding records owned by users.

pub mod queries;

pub use queries::{PgWeddingRepository, WeddingRepository};
