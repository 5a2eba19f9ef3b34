//! Authentication service: bearer token extraction, request verification
//! and the login/register flows delegating to `wedding_core::auth`.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use tracing::{error, info, warn};
use wedding_core::auth::password::{hash_password, verify_password};
use wedding_core::auth::queries::UserRepository;
use wedding_core::auth::{TokenError, TokenService};
use wedding_core::models::auth::TokenClaims;
use wedding_core::models::user::{NewUser, Registration};
use wedding_core::store::StoreError;

use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse, RegisterResponse, UserView};

/// Pause applied to every failed login before answering.
pub const FAILED_LOGIN_DELAY: Duration = Duration::from_millis(100);

const BEARER_PREFIX: &str = "Bearer ";

/// Hash checked against when the email is unknown, so both failure paths
/// pay for a bcrypt verification.
static UNKNOWN_USER_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("unknown-user-placeholder").ok());

/// Return the bearer token carried by `headers`, or an empty string.
///
/// The scheme match is case-sensitive and the remainder is trimmed.
pub fn extract_token(headers: &HeaderMap) -> String {
    let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };
    if value.len() > BEARER_PREFIX.len() && value.starts_with(BEARER_PREFIX) {
        value[BEARER_PREFIX.len()..].trim().to_string()
    } else {
        String::new()
    }
}

/// Verifies the identity of incoming requests.
#[derive(Debug, Clone)]
pub struct Authenticator {
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Verify the request's bearer token.
    pub fn verify_request(&self, headers: &HeaderMap) -> Result<TokenClaims, TokenError> {
        let token = extract_token(headers);
        if token.is_empty() {
            return Err(TokenError::Missing);
        }
        self.tokens.verify(&token)
    }

    /// The principal ID of a verified, self-consistent token.
    pub fn extract_principal_id(&self, headers: &HeaderMap) -> Result<i64, TokenError> {
        self.verify_request(headers)?
            .principal_id()
            .ok_or(TokenError::Invalid)
    }

    /// The full claim set of a verified, self-consistent token.
    pub fn extract_full_claims(&self, headers: &HeaderMap) -> Result<TokenClaims, TokenError> {
        let claims = self.verify_request(headers)?;
        match claims.principal_id() {
            Some(_) => Ok(claims),
            None => Err(TokenError::Invalid),
        }
    }
}

async fn reject_login() -> AppError {
    tokio::time::sleep(FAILED_LOGIN_DELAY).await;
    AppError::Unauthorized("invalid email or password".into())
}

/// Authenticate with email + password.
///
/// Unknown emails, wrong passwords and unreadable stored hashes all produce
/// the same delayed 401.
pub async fn login(
    users: &dyn UserRepository,
    tokens: &TokenService,
    req: LoginRequest,
) -> AppResult<LoginResponse> {
    let email = req.email.trim();

    let user = match users.find_by_email(email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            if let Some(hash) = UNKNOWN_USER_HASH.as_deref() {
                let _ = verify_password(hash, &req.password);
            }
            return Err(reject_login().await);
        }
        Err(e) => {
            error!(error = %e, "user lookup failed during login");
            return Err(reject_login().await);
        }
    };

    match verify_password(&user.password_hash, &req.password) {
        Ok(true) => {}
        Ok(false) => {
            warn!(email, "failed login attempt");
            return Err(reject_login().await);
        }
        Err(e) => {
            error!(user_id = user.id, error = %e, "stored password hash is unreadable");
            return Err(reject_login().await);
        }
    }

    let token = tokens.issue(user.id, &user.email).map_err(|e| {
        error!(user_id = user.id, error = %e, "failed to issue token");
        AppError::Internal("unable to complete authentication".into())
    })?;

    info!(user_id = user.id, "successful login");

    Ok(LoginResponse {
        token,
        expires_in: tokens.lifetime().num_seconds(),
        user: UserView::from(&user),
    })
}

/// Register a new user account and sign them in.
pub async fn register(
    users: &dyn UserRepository,
    tokens: &TokenService,
    registration: Registration,
) -> AppResult<RegisterResponse> {
    let reg = registration.validate()?;

    let password_hash = hash_password(&reg.password).map_err(|e| {
        error!(error = %e, "password hashing failed during registration");
        AppError::Internal("unable to register user at this time".into())
    })?;

    let new_user = NewUser {
        name: reg.name,
        email: reg.email,
        password_hash,
        partner_name: reg.partner_name,
    };

    let user = users.create(new_user).await.map_err(|e| match e {
        StoreError::Duplicate => {
            AppError::Conflict("unable to register user, please check your data".into())
        }
        other => {
            error!(error = %other, "failed to create user");
            AppError::Internal("unable to register user at this time".into())
        }
    })?;

    let token = tokens.issue(user.id, &user.email).map_err(|e| {
        error!(user_id = user.id, error = %e, "failed to issue token");
        AppError::Internal("unable to complete authentication".into())
    })?;

    info!(user_id = user.id, "user registered");

    Ok(RegisterResponse {
        message: "user registered successfully".into(),
        user: UserView::from(&user),
        token,
        expires_in: tokens.lifetime().num_seconds(),
    })
}
