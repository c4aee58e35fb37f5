//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - Request/response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
