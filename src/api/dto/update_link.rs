//! DTO for the link update endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request to repoint a short code at a new long URL.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, message = "new_long_link cannot be empty"))]
    pub new_long_link: String,
}
