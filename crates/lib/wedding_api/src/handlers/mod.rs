//! Request handlers.

pub mod health;
pub mod user;
pub mod weddings;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use tracing::debug;

use crate::error::AppError;

pub(crate) const INVALID_REQUEST_DATA: &str = "invalid request data";

/// Unwrap a JSON body, answering 400 when it cannot be read.
pub(crate) fn json_or_bad_request<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(v)| v).map_err(|e| {
        debug!(error = %e, "rejected request body");
        AppError::BadRequest(INVALID_REQUEST_DATA.into())
    })
}

/// Unwrap a JSON body, answering 422 when it cannot be read.
pub(crate) fn json_or_unprocessable<T>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    body.map(|Json(v)| v).map_err(|e| {
        debug!(error = %e, "rejected request body");
        AppError::Unprocessable(INVALID_REQUEST_DATA.into())
    })
}
