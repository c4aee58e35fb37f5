//! Repository trait for access statistics.

use crate::domain::entities::{AccessStatistic, NewAccessStatistic};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording and reading access statistics.
///
/// Statistics are append-only; there is no update or delete operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Records one access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `url_id` does not reference an existing entry.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn save(&self, new_stat: NewAccessStatistic) -> Result<AccessStatistic, AppError>;

    /// Lists all statistics recorded for the entry `url_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_url_id(&self, url_id: i64) -> Result<Vec<AccessStatistic>, AppError>;
}
