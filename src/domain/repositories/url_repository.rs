//! Repository trait for URL entry data access.

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL entries.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new entry and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError>;

    /// Finds an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlEntry>, AppError>;

    /// Finds an entry by its short token.
    ///
    /// Several entries may share a token. Implementations return the one with the
    /// lowest id so repeated lookups are stable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlEntry>, AppError>;

    /// Lists every entry owned by `username`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Vec<UrlEntry>, AppError>;

    /// Deletes an entry by id.
    ///
    /// Returns `Ok(true)` if a row was removed and `Ok(false)` if the id was unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if access statistics still reference the entry.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
