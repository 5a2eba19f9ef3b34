//! Authentication domain models.

use serde::{Deserialize, Serialize};

use crate::auth::jwt::TOKEN_ISSUER;

/// JWT claims embedded in identity tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user ID as a string (standard JWT `sub` claim).
    pub sub: String,
    /// Numeric user ID.
    pub user_id: i64,
    /// User email.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Not before (unix timestamp).
    pub nbf: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// The principal these claims identify, if they are self-consistent.
    ///
    /// A verified signature does not make a claim set usable on its own: the
    /// issuer must be ours and `sub` must name the same user as `user_id`.
    pub fn principal_id(&self) -> Option<i64> {
        (self.iss == TOKEN_ISSUER && self.sub == self.user_id.to_string()).then_some(self.user_id)
    }
}
