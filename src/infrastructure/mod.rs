//! Infrastructure layer for external integrations.
//!
//! Implements the storage ports defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
