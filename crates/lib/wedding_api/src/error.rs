//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use wedding_core::auth::{AuthError, TokenError};
use wedding_core::models::wedding::InvalidWedding;
use wedding_core::store::StoreError;

use crate::models::ErrorResponse;

/// Public message for failures whose detail stays in the logs.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Every variant carries the message sent to the client as `{"error": ..}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::SecretNotSet | TokenError::Signing(_) => {
                error!(error = %e, "token service failure");
                AppError::Internal(INTERNAL_MESSAGE.into())
            }
            _ => AppError::Unauthorized(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => AppError::Conflict(e.to_string()),
            StoreError::NotFound => AppError::NotFound(e.to_string()),
            StoreError::Db(ref inner) => {
                error!(error = %inner, "database error");
                AppError::Internal(INTERNAL_MESSAGE.into())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized(e.to_string()),
            AuthError::Token(t) => AppError::from(t),
            AuthError::HashingError(msg) => {
                error!(error = %msg, "password hashing failed");
                AppError::Internal(INTERNAL_MESSAGE.into())
            }
            AuthError::ValidationError(msg) => AppError::BadRequest(msg),
            AuthError::Store(s) => AppError::from(s),
        }
    }
}

impl From<InvalidWedding> for AppError {
    fn from(e: InvalidWedding) -> Self {
        AppError::BadRequest(e.to_string())
    }
}
