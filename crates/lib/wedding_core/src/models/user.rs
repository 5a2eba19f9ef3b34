//! User accounts and the input rules applied to them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::AuthError;

/// Characters that satisfy the "special character" password rule.
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// bcrypt only reads this many bytes of input.
const MAX_PASSWORD_BYTES: usize = 72;

/// Bounds on `name`, in characters. Matches the `users.name` column.
const NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=100;

/// Upper bound on `partner_name`, in characters.
const MAX_PARTNER_NAME_CHARS: usize = 100;

/// Stored user row. Soft-deleted rows are never loaded.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub partner_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub partner_name: String,
}

/// Registration input as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub partner_name: String,
}

impl Registration {
    /// Trim the text fields and check every registration rule, in order.
    pub fn validate(mut self) -> Result<Self, AuthError> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.partner_name = self.partner_name.trim().to_string();

        let fail = |msg: &str| Err(AuthError::ValidationError(msg.to_string()));
        if self.name.is_empty() {
            return fail("name cannot be empty");
        }
        if self.email.is_empty() {
            return fail("email cannot be empty");
        }
        if self.partner_name.is_empty() {
            return fail("partner name cannot be empty");
        }
        if self.password.is_empty() {
            return fail("password cannot be empty");
        }
        if !NAME_CHARS.contains(&self.name.chars().count()) {
            return fail("name must be between 2 and 100 characters");
        }
        if self.partner_name.chars().count() > MAX_PARTNER_NAME_CHARS {
            return fail("partner name must be at most 100 characters");
        }
        if !is_well_formed_email(&self.email) {
            return fail("invalid email format");
        }
        check_password_strength(&self.password)?;

        Ok(self)
    }
}

/// Partial profile update. Empty values leave the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub partner_name: Option<String>,
}

impl ProfileUpdate {
    /// Same length limits as registration.
    pub fn validate(&self) -> Result<(), AuthError> {
        let invalid = || AuthError::ValidationError("invalid request data".to_string());
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty())
            && !NAME_CHARS.contains(&name.chars().count())
        {
            return Err(invalid());
        }
        if let Some(partner) = self.partner_name.as_deref()
            && partner.chars().count() > MAX_PARTNER_NAME_CHARS
        {
            return Err(invalid());
        }
        Ok(())
    }

    /// Copy the provided, trimmed values onto `user`.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            user.name = name.trim().to_string();
        }
        if let Some(partner) = self.partner_name.as_deref().filter(|p| !p.is_empty()) {
            user.partner_name = partner.trim().to_string();
        }
    }
}

/// A bare `local@domain` address with no whitespace and a sane domain.
pub fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if email
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | ',' | ';'))
    {
        return false;
    }
    !(domain.starts_with('.') || domain.ends_with('.') || domain.contains(".."))
}

fn check_password_strength(password: &str) -> Result<(), AuthError> {
    let rule = |ok: bool, msg: &str| {
        if ok {
            Ok(())
        } else {
            Err(AuthError::ValidationError(msg.to_string()))
        }
    };
    rule(
        password.len() >= 8,
        "password must be at least 8 characters long",
    )?;
    rule(
        password.len() <= MAX_PASSWORD_BYTES,
        "password must be at most 72 bytes long",
    )?;
    rule(
        password.chars().any(|c| c.is_ascii_digit()),
        "password must contain at least one number",
    )?;
    rule(
        password.chars().any(|c| c.is_ascii_uppercase()),
        "password must contain at least one uppercase letter",
    )?;
    rule(
        password.chars().any(|c| c.is_ascii_lowercase()),
        "password must contain at least one lowercase letter",
    )?;
    rule(
        password.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
        "password must contain at least one special character",
    )
}
