//! DTOs for URL entry endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlEntry;

/// Request body for `POST /generate`.
///
/// `url` may be blank; the service then answers with `null` instead of an entry.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
    pub username: String,
}

/// JSON representation of a URL entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: i64,
    pub long_url: String,
    pub short_url: String,
    pub username: String,
}

impl From<UrlEntry> for UrlResponse {
    fn from(entry: UrlEntry) -> Self {
        Self {
            id: entry.id,
            long_url: entry.long_url,
            short_url: entry.short_url,
            username: entry.username,
        }
    }
}
