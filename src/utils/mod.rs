//! Utility functions used across the application.
//!
//! - [`short_token`] - Short token derivation from a long URL
//! - [`client_ip`] - Client address resolution for access statistics

pub mod client_ip;
pub mod short_token;
