//! User persistence.
//!
//! `UserRepository` is the seam the HTTP layer talks to; `PgUserRepository`
//! is the Postgres implementation. Soft-deleted users are invisible to
//! every query.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::user::{NewUser, User};
use crate::store::StoreError;

const USER_COLUMNS: &str = "id, name, email, password_hash, partner_name, created_at, updated_at";

/// User storage operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a live user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fetch a live user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Insert a user. A taken email is `StoreError::Duplicate`.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Persist the mutable profile fields of `user`.
    async fn update(&self, user: &User) -> Result<User, StoreError>;

    /// Mark a user deleted. Returns whether a live row was affected.
    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Postgres-backed [`UserRepository`].
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, partner_name) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.partner_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let sql = format!(
            "UPDATE users SET name = $2, partner_name = $3, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.partner_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
