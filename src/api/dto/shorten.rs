//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, message = "long_link cannot be empty"))]
    pub long_link: String,

    /// Optional custom short code instead of the derived one.
    pub custom_alias: Option<String>,

    /// Optional expiry timestamp. After this time the link resolves as
    /// absent and is eventually reclaimed by the deferred deletion job.
    pub expires_at: Option<DateTime<Utc>>,
}
