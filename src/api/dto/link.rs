//! JSON representation of a link.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Link;

/// Full link representation returned by create, update and the expired
/// listing.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub long_link: String,
    pub short_link: String,
    pub is_authenticated: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub access_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            long_link: link.long_link,
            short_link: link.short_link,
            is_authenticated: link.is_authenticated,
            owner_id: link.owner_id,
            created_at: link.created_at,
            last_accessed_at: link.last_accessed_at,
            access_count: link.access_count,
            expires_at: link.expires_at,
        }
    }
}
