//! PostgreSQL implementation of the statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AccessStatistic, NewAccessStatistic};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct StatRow {
    id: i64,
    url_id: i64,
    access_time: DateTime<Utc>,
    user_agent: Option<String>,
    referrer: Option<String>,
    client_ip: Option<String>,
}

impl From<StatRow> for AccessStatistic {
    fn from(row: StatRow) -> Self {
        AccessStatistic::new(
            row.id,
            row.url_id,
            row.access_time,
            row.user_agent,
            row.referrer,
            row.client_ip,
        )
    }
}

/// PostgreSQL repository for the append-only `stats` table.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn save(&self, new_stat: NewAccessStatistic) -> Result<AccessStatistic, AppError> {
        let row = sqlx::query_as::<_, StatRow>(
            r#"
            INSERT INTO stats (url_id, access_time, user_agent, referrer, client_ip)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, url_id, access_time, user_agent, referrer, client_ip
            "#,
        )
        .bind(new_stat.url_id)
        .bind(new_stat.access_time)
        .bind(new_stat.user_agent)
        .bind(new_stat.referrer)
        .bind(new_stat.client_ip)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_url_id(&self, url_id: i64) -> Result<Vec<AccessStatistic>, AppError> {
        let rows = sqlx::query_as::<_, StatRow>(
            r#"
            SELECT id, url_id, access_time, user_agent, referrer, client_ip
            FROM stats
            WHERE url_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(url_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
