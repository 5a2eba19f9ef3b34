//! # wedding_api
//!
//! HTTP API library for the wedding planner service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Method, StatusCode, header};
use axum::routing::{delete, get, patch, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use wedding_core::auth::TokenService;
use wedding_core::auth::queries::UserRepository;
use wedding_core::weddings::WeddingRepository;

use crate::config::ApiConfig;
use crate::handlers::{health, user, weddings};
use crate::middleware::auth::{AuthGate, RequestStage, require_auth};
use crate::services::auth::Authenticator;

/// Largest accepted request body: 1 MiB.
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub weddings: Arc<dyn WeddingRepository>,
    /// Token issuer/verifier built from the configured secret.
    pub tokens: Arc<TokenService>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `wedding_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    wedding_core::migrate::migrate(pool).await
}

fn cors() -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers(headers)
}

/// Requests still running after `limit` are answered with 408.
fn timeout(limit: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, limit)
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let gate: Arc<dyn RequestStage> = Arc::new(AuthGate::new(Authenticator::new(Arc::clone(
        &state.tokens,
    ))));

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_HEALTH_STATUS, get(health::health_status))
        .route(routes::POST_USER_REGISTER, post(user::register_handler))
        .route(routes::POST_USER_LOGIN, post(user::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_USER_PROFILE, get(user::profile_handler))
        .route(routes::PATCH_USER_UPDATE, patch(user::update_handler))
        .route(routes::DELETE_USER_DELETE, delete(user::delete_handler))
        .route(routes::POST_USER_LOGOUT, post(user::logout_handler))
        .route(
            routes::WEDDINGS,
            post(weddings::create_handler).get(weddings::list_handler),
        )
        .route(
            routes::WEDDINGS_ID,
            get(weddings::get_handler)
                .put(weddings::update_handler)
                .delete(weddings::delete_handler),
        )
        .route(
            routes::GET_WEDDINGS_ID_COUNTDOWN,
            get(weddings::countdown_handler),
        )
        .layer(axum::middleware::from_fn_with_state(gate, require_auth));

    let mut app = Router::new()
        .nest(routes::API_PREFIX, public.merge(protected))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(timeout(state.config.request_timeout))
        .layer(TraceLayer::new_for_http());

    if state.config.is_production() {
        app = app.layer(cors());
    }

    app.with_state(state)
}
