//! DTOs for access statistics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::AccessStatistic;

/// JSON representation of one recorded access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessStatisticResponse {
    pub id: i64,
    pub url_id: i64,
    pub access_time: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub client_ip: Option<String>,
}

impl From<AccessStatistic> for AccessStatisticResponse {
    fn from(stat: AccessStatistic) -> Self {
        Self {
            id: stat.id,
            url_id: stat.url_id,
            access_time: stat.access_time,
            user_agent: stat.user_agent,
            referrer: stat.referrer,
            client_ip: stat.client_ip,
        }
    }
}
