//! Signed identity tokens (HS256, 24 h lifetime).
//!
//! Verification runs its checks in a fixed order so callers get a precise
//! reason: header algorithm, then structure and signature, then the
//! expiry and not-before timestamps.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::auth::TokenClaims;

/// Issuer stamped into (and expected from) every token.
pub const TOKEN_ISSUER: &str = "wedding_planner_service";

/// Token lifetime: 24 hours.
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Algorithms accepted on verification.
const HMAC_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Token errors. Exactly one is reported per failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("authorization token is missing")]
    Missing,

    #[error("token is invalid or malformed")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotValidYet,

    #[error("invalid token signing method: {0}")]
    InvalidSigningMethod(String),

    #[error("signing secret is not set")]
    SecretNotSet,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Only the algorithm is read from the header before the signature check.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Issues and verifies tokens with a symmetric secret.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a service from the signing secret. An empty secret is refused.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::SecretNotSet);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime: Duration::seconds(TOKEN_LIFETIME_SECS),
        })
    }

    /// How long an issued token stays valid.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for a user, stamped with the current time.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the clock read `now`.
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let issued_at = now.timestamp();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            user_id,
            email: email.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: issued_at,
            nbf: issued_at,
            exp: (now + self.lifetime).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(format!("jwt encode: {e}")))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the clock read `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let alg = header_algorithm(token)?;
        if !HMAC_ALGORITHMS.contains(&alg.as_str()) {
            return Err(TokenError::InvalidSigningMethod(alg));
        }
        let algorithm: Algorithm = alg.parse().map_err(|_| TokenError::Invalid)?;

        // Timestamps are checked below against the supplied clock.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                TokenError::Invalid
            })?
            .claims;

        let now = now.timestamp();
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        if now < claims.nbf {
            return Err(TokenError::NotValidYet);
        }

        Ok(claims)
    }
}

/// Read `alg` from the token header without trusting anything else in it.
fn header_algorithm(token: &str) -> Result<String, TokenError> {
    let segment = token.split('.').next().unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Invalid)?;
    let header: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::Invalid)?;
    Ok(header.alg)
}
