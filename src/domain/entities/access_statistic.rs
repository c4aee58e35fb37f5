//! Access statistic entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// One recorded access of a short URL.
///
/// Many statistics reference one [`super::UrlEntry`] through `url_id`; the entry
/// does not own them. Client metadata is optional because browsers and proxies
/// may omit any of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessStatistic {
    pub id: i64,
    pub url_id: i64,
    pub access_time: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub client_ip: Option<String>,
}

impl AccessStatistic {
    /// Creates a new AccessStatistic instance.
    pub fn new(
        id: i64,
        url_id: i64,
        access_time: DateTime<Utc>,
        user_agent: Option<String>,
        referrer: Option<String>,
        client_ip: Option<String>,
    ) -> Self {
        Self {
            id,
            url_id,
            access_time,
            user_agent,
            referrer,
            client_ip,
        }
    }
}

/// Input data for recording an access.
///
/// The access time is captured by the caller when the request is handled,
/// not by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessStatistic {
    pub url_id: i64,
    pub access_time: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub client_ip: Option<String>,
}
