//! Authentication middleware: bearer token verification in front of every
//! protected route.
//!
//! The gate is a [`RequestStage`]; stages compose with [`RequestStage::then`]
//! and `require_auth` adapts the resulting chain to an axum middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::services::auth::Authenticator;

/// Result of running one stage over a request.
pub enum StageOutcome {
    /// Hand the (possibly enriched) request to the next stage.
    Continue,
    /// Stop here and answer with this response.
    Reject(Response),
}

/// One synchronous step applied to a request before it reaches a handler.
pub trait RequestStage: Send + Sync {
    fn process(&self, request: &mut Request) -> StageOutcome;

    /// Run `next` after `self`, only if `self` lets the request through.
    fn then<S>(self, next: S) -> Chain<Self, S>
    where
        Self: Sized,
        S: RequestStage,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two stages run in order.
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: RequestStage, B: RequestStage> RequestStage for Chain<A, B> {
    fn process(&self, request: &mut Request) -> StageOutcome {
        match self.first.process(request) {
            StageOutcome::Continue => self.second.process(request),
            reject => reject,
        }
    }
}

/// The authenticated principal, inserted into request extensions by
/// [`AuthGate`]. Handlers take it as `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

/// Rejects requests without a valid bearer token; otherwise records the
/// principal for downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthGate {
    authenticator: Authenticator,
}

impl AuthGate {
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }
}

impl RequestStage for AuthGate {
    fn process(&self, request: &mut Request) -> StageOutcome {
        let claims = match self.authenticator.verify_request(request.headers()) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, path = %request.uri().path(), "request rejected");
                return StageOutcome::Reject(AppError::Unauthorized(e.to_string()).into_response());
            }
        };

        let Some(user_id) = claims.principal_id() else {
            debug!(sub = %claims.sub, "token claims do not identify a user");
            return StageOutcome::Reject(
                AppError::Unauthorized("failed to extract user information".into())
                    .into_response(),
            );
        };

        request
            .extensions_mut()
            .insert(AuthenticatedUser { user_id });
        StageOutcome::Continue
    }
}

/// Axum middleware: runs the gate stage and forwards the request only when
/// it continues.
pub async fn require_auth(
    State(stage): State<Arc<dyn RequestStage>>,
    mut request: Request,
    next: Next,
) -> Response {
    match stage.process(&mut request) {
        StageOutcome::Continue => next.run(request).await,
        StageOutcome::Reject(response) => response,
    }
}
