//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// bcrypt only looks at the first 72 bytes of its input.
const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with bcrypt (cost 10).
///
/// Passwords longer than 72 bytes are rejected rather than truncated.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
        return Err(AuthError::HashingError(format!(
            "password exceeds {BCRYPT_MAX_PASSWORD_BYTES} bytes"
        )));
    }
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::HashingError(format!("bcrypt hash: {e}")))
}

/// Verify a candidate password against a stored bcrypt hash.
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(hash: &str, candidate: &str) -> Result<bool, AuthError> {
    bcrypt::verify(candidate, hash)
        .map_err(|e| AuthError::HashingError(format!("bcrypt verify: {e}")))
}
