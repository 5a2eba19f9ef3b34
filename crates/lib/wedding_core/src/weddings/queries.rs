//! Wedding persistence.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::wedding::{NewWedding, Wedding};
use crate::store::StoreError;

const WEDDING_COLUMNS: &str = "id, user_id, venue_name, venue_address, event_date, event_time, \
                               max_guests, current_guest_count, created_at, updated_at";

/// Wedding storage operations. Every read is scoped to live rows.
#[async_trait]
pub trait WeddingRepository: Send + Sync {
    async fn create(&self, owner_id: i64, wedding: NewWedding) -> Result<Wedding, StoreError>;

    /// All live weddings of `owner_id`, soonest first.
    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Wedding>, StoreError>;

    /// A wedding by ID, only if `owner_id` owns it.
    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Wedding>, StoreError>;

    async fn update(&self, wedding: &Wedding) -> Result<Wedding, StoreError>;

    /// Returns whether a live row was affected.
    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Postgres-backed [`WeddingRepository`].
#[derive(Clone)]
pub struct PgWeddingRepository {
    pool: PgPool,
}

impl PgWeddingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeddingRepository for PgWeddingRepository {
    async fn create(&self, owner_id: i64, wedding: NewWedding) -> Result<Wedding, StoreError> {
        let sql = format!(
            "INSERT INTO weddings (user_id, venue_name, venue_address, event_date, event_time, max_guests) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {WEDDING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Wedding>(&sql)
            .bind(owner_id)
            .bind(&wedding.venue_name)
            .bind(&wedding.venue_address)
            .bind(wedding.event_date)
            .bind(&wedding.event_time)
            .bind(wedding.max_guests)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Wedding>, StoreError> {
        let sql = format!(
            "SELECT {WEDDING_COLUMNS} FROM weddings \
             WHERE user_id = $1 AND deleted_at IS NULL ORDER BY event_date ASC"
        );
        let rows = sqlx::query_as::<_, Wedding>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Wedding>, StoreError> {
        let sql = format!(
            "SELECT {WEDDING_COLUMNS} FROM weddings \
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, Wedding>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, wedding: &Wedding) -> Result<Wedding, StoreError> {
        let sql = format!(
            "UPDATE weddings SET venue_name = $2, venue_address = $3, event_date = $4, \
             event_time = $5, max_guests = $6, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {WEDDING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Wedding>(&sql)
            .bind(wedding.id)
            .bind(&wedding.venue_name)
            .bind(&wedding.venue_address)
            .bind(wedding.event_date)
            .bind(&wedding.event_time)
            .bind(wedding.max_guests)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE weddings SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
