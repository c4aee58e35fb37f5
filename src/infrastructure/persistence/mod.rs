//! PostgreSQL repository implementations.
//!
//! Queries are runtime-checked `sqlx::query_as` statements mapped through
//! `FromRow` row types, so building the crate needs no live database.
//!
//! - [`PgUrlRepository`] - URL entry storage and lookup
//! - [`PgStatsRepository`] - Access statistic recording

pub mod pg_stats_repository;
pub mod pg_url_repository;

pub use pg_stats_repository::PgStatsRepository;
pub use pg_url_repository::PgUrlRepository;
