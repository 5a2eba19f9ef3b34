//! Authentication and authorization logic.
//!
//! Provides password hashing, signed token management and the user
//! repository shared by `wedding_api` and the server binary.

pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

pub use jwt::{TOKEN_ISSUER, TOKEN_LIFETIME_SECS, TokenError, TokenService};

use crate::store::StoreError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Both collapse into one message.
    #[error("invalid email or password")]
    CredentialError,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("password hashing failed: {0}")]
    HashingError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
