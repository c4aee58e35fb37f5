//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage ports of the service. They are passed into
//! [`crate::application::services::ShortenerService`] at construction and
//! implemented in `crate::infrastructure::persistence`.
//!
//! - [`UrlRepository`] - URL entry storage and lookup
//! - [`StatsRepository`] - Access statistic recording
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod stats_repository;
pub mod url_repository;

pub use stats_repository::StatsRepository;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use stats_repository::MockStatsRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
