//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UrlRow {
    short_code: String,
    origin_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::with_created_at(row.short_code, row.origin_url, row.created_at)
    }
}

/// PostgreSQL repository for URL record storage and retrieval.
///
/// Queries are bound at runtime, so the crate builds without a live database.
/// Short-code uniqueness is enforced by the `urls` primary key.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, record: &UrlRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO urls (short_code, origin_url, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.short_code)
        .bind(&record.origin_url)
        .bind(record.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn get_by_origin(&self, origin_url: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_code, origin_url, created_at
            FROM urls
            WHERE origin_url = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(origin_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn get_by_short(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_code, origin_url, created_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, record: &UrlRecord) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET origin_url = $2 WHERE short_code = $1")
            .bind(&record.short_code)
            .bind(&record.origin_url)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
