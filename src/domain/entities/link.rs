//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shortened URL link with ownership and usage metadata.
///
/// `short_link` is globally unique across all links and immutable after
/// creation. `owner_id` is `None` for anonymous links; all unauthenticated
/// callers share that single "no owner" identity space.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
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

impl Link {
    /// Returns true if the link has passed its expiry time.
    ///
    /// Links with no `expires_at` never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }
}

/// Input data for creating a new link.
///
/// `created_at` doubles as the initial `last_accessed_at`; `access_count`
/// always starts at zero and is not part of the input.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub long_link: String,
    pub short_link: String,
    pub is_authenticated: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Read-only usage statistics for a link.
///
/// Serializable so the cache layer can store it as a JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkStats {
    pub long_link: String,
    pub created_at: DateTime<Utc>,
    pub clicks_count: i64,
    pub last_used: DateTime<Utc>,
}

impl From<&Link> for LinkStats {
    fn from(link: &Link) -> Self {
        Self {
            long_link: link.long_link.clone(),
            created_at: link.created_at,
            clicks_count: link.access_count,
            last_used: link.last_accessed_at,
        }
    }
}
