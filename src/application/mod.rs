//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers
//! and the operator CLI.
//!
//! - [`services::shortener_service::ShortenerService`] - Token generation, lookup,
//!   owner-scoped access and statistics

pub mod services;
