//! DTO for the link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkStats;

/// Usage statistics for a single link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub long_link: String,
    pub created_at: DateTime<Utc>,
    pub clicks_count: i64,
    pub last_used: DateTime<Utc>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            long_link: stats.long_link,
            created_at: stats.created_at,
            clicks_count: stats.clicks_count,
            last_used: stats.last_used,
        }
    }
}
