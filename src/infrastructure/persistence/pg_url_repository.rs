//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    long_url: String,
    short_url: String,
    username: String,
}

impl From<UrlRow> for UrlEntry {
    fn from(row: UrlRow) -> Self {
        UrlEntry::new(row.id, row.long_url, row.short_url, row.username)
    }
}

/// PostgreSQL repository for the `urls` table.
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
    async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (long_url, short_url, username)
            VALUES ($1, $2, $3)
            RETURNING id, long_url, short_url, username
            "#,
        )
        .bind(new_entry.long_url)
        .bind(new_entry.short_url)
        .bind(new_entry.username)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlEntry>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, short_url, username
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlEntry>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, short_url, username
            FROM urls
            WHERE short_url = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<UrlEntry>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, short_url, username
            FROM urls
            WHERE username = $1
            ORDER BY id ASC
            "#,
        )
        .bind(username)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
