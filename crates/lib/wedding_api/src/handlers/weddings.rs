//! Wedding request handlers.
//!
//! Every lookup is scoped to the caller: a wedding owned by someone else is
//! indistinguishable from one that does not exist.

use axum::{Extension, Json};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use tracing::{error, info};
use wedding_core::models::wedding::{NewWedding, Wedding, WeddingUpdate};

use super::json_or_bad_request;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    CountdownResponse, MessageResponse, WeddingChangedResponse, WeddingListResponse,
    WeddingResponse, WeddingSummary, WeddingView,
};

/// Parse a positive numeric path ID.
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    match raw.parse::<u32>() {
        Ok(id) if id > 0 => Ok(i64::from(id)),
        _ => Err(AppError::BadRequest("invalid ID parameter".into())),
    }
}

async fn load_owned(state: &AppState, raw_id: &str, owner_id: i64) -> AppResult<Wedding> {
    let id = parse_id(raw_id)?;
    state
        .weddings
        .find_owned(id, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("wedding not found or access denied".into()))
}

/// `POST /api/v1/weddings`
pub async fn create_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    body: Result<Json<NewWedding>, JsonRejection>,
) -> AppResult<(StatusCode, Json<WeddingChangedResponse>)> {
    let new_wedding = json_or_bad_request(body)?.validate()?;

    let wedding = state
        .weddings
        .create(principal.user_id, new_wedding)
        .await
        .map_err(|e| {
            error!(user_id = principal.user_id, error = %e, "failed to create wedding");
            AppError::Internal("unable to create wedding".into())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(WeddingChangedResponse {
            message: "wedding created successfully".into(),
            wedding: WeddingView::from(&wedding),
        }),
    ))
}

/// `GET /api/v1/weddings`
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> AppResult<Json<WeddingListResponse>> {
    let weddings = state
        .weddings
        .list_for_owner(principal.user_id)
        .await
        .map_err(|e| {
            error!(user_id = principal.user_id, error = %e, "failed to list weddings");
            AppError::Internal("unable to fetch weddings".into())
        })?;

    let weddings: Vec<WeddingSummary> = weddings.iter().map(WeddingSummary::from).collect();
    Ok(Json(WeddingListResponse {
        count: weddings.len(),
        weddings,
    }))
}

/// `GET /api/v1/weddings/{id}`
pub async fn get_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<WeddingResponse>> {
    let wedding = load_owned(&state, &id, principal.user_id).await?;
    Ok(Json(WeddingResponse {
        wedding: WeddingView::from(&wedding),
    }))
}

/// `PUT /api/v1/weddings/{id}`: partial update.
pub async fn update_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<WeddingUpdate>, JsonRejection>,
) -> AppResult<Json<WeddingChangedResponse>> {
    let mut wedding = load_owned(&state, &id, principal.user_id).await?;
    let update = json_or_bad_request(body)?;
    update.validate()?;
    update.apply(&mut wedding);

    let wedding = state.weddings.update(&wedding).await.map_err(|e| {
        error!(wedding_id = wedding.id, error = %e, "failed to update wedding");
        AppError::Internal("unable to update wedding".into())
    })?;

    Ok(Json(WeddingChangedResponse {
        message: "wedding updated successfully".into(),
        wedding: WeddingView::from(&wedding),
    }))
}

/// `DELETE /api/v1/weddings/{id}`: soft delete.
pub async fn delete_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let wedding = load_owned(&state, &id, principal.user_id).await?;

    state.weddings.soft_delete(wedding.id).await.map_err(|e| {
        error!(wedding_id = wedding.id, error = %e, "failed to delete wedding");
        AppError::Internal("unable to delete wedding".into())
    })?;

    info!(
        user_id = principal.user_id,
        wedding_id = wedding.id,
        venue = %wedding.venue_name,
        "wedding deleted"
    );
    Ok(Json(MessageResponse::new("wedding deleted successfully")))
}

/// `GET /api/v1/weddings/{id}/countdown`
pub async fn countdown_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<CountdownResponse>> {
    let wedding = load_owned(&state, &id, principal.user_id).await?;
    Ok(Json(CountdownResponse::at(&wedding, Utc::now())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("7").unwrap(), 7);
        for raw in ["0", "-1", "abc", "1.5", "", "99999999999"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "id {raw:?}");
            assert_eq!(err.to_string(), "invalid ID parameter");
        }
    }
}
