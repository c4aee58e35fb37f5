//! Data Transfer Objects for API requests and responses.
//!
//! JSON field names are camelCase. Absent results are serialized as `null`.

pub mod health;
pub mod stats;
pub mod url;

pub use health::{CheckStatus, HealthChecks, HealthResponse};
pub use stats::AccessStatisticResponse;
pub use url::{GenerateRequest, UrlResponse};
