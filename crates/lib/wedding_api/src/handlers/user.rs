//! Account request handlers.

use axum::{Extension, Json};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::{error, info};
use wedding_core::models::user::{ProfileUpdate, Registration};

use super::{json_or_bad_request, json_or_unprocessable};
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, ProfileUpdatedResponse, RegisterResponse,
    UserView,
};
use crate::services::auth;

fn user_not_found() -> AppError {
    AppError::NotFound("user not found".into())
}

/// `POST /api/v1/user/register`
pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<Registration>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = json_or_unprocessable(body)?;
    let resp = auth::register(state.users.as_ref(), &state.tokens, registration).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `POST /api/v1/user/login`
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let req = json_or_unprocessable(body)?;
    let resp = auth::login(state.users.as_ref(), &state.tokens, req).await?;
    Ok(Json(resp))
}

/// `GET /api/v1/user/profile`
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> AppResult<Json<UserView>> {
    let user = state
        .users
        .find_by_id(principal.user_id)
        .await
        .map_err(|e| {
            error!(user_id = principal.user_id, error = %e, "failed to fetch user");
            AppError::Internal("unable to fetch user profile".into())
        })?
        .ok_or_else(user_not_found)?;
    Ok(Json(UserView::from(&user)))
}

/// `PATCH /api/v1/user/update`
pub async fn update_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> AppResult<Json<ProfileUpdatedResponse>> {
    let update = json_or_bad_request(body)?;
    update.validate()?;

    let mut user = state
        .users
        .find_by_id(principal.user_id)
        .await?
        .ok_or_else(user_not_found)?;
    update.apply(&mut user);

    let user = state.users.update(&user).await.map_err(|e| {
        error!(user_id = principal.user_id, error = %e, "failed to update user");
        AppError::Internal("unable to update profile".into())
    })?;

    Ok(Json(ProfileUpdatedResponse {
        message: "profile updated successfully".into(),
        user: UserView::from(&user),
    }))
}

/// `DELETE /api/v1/user/delete`: soft delete of the caller's account.
pub async fn delete_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .users
        .soft_delete(principal.user_id)
        .await
        .map_err(|e| {
            error!(user_id = principal.user_id, error = %e, "failed to delete user");
            AppError::Internal("unable to delete user account".into())
        })?;
    if !deleted {
        return Err(user_not_found());
    }

    info!(user_id = principal.user_id, "user deleted account");
    Ok(Json(MessageResponse::new("user account deleted successfully")))
}

/// `POST /api/v1/user/logout`
///
/// Tokens are stateless, so this only acknowledges; the token stays valid
/// until it expires.
pub async fn logout_handler(
    Extension(principal): Extension<AuthenticatedUser>,
) -> Json<MessageResponse> {
    info!(user_id = principal.user_id, "user logged out");
    Json(MessageResponse::new("logged out successfully"))
}
