//! Short code derivation and custom alias validation.

use crate::error::AppError;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Length of a derived short code in characters.
const CODE_LENGTH: usize = 8;

/// Derives the short code for a long URL within one owner's identity space.
///
/// SHA-256 over `{owner}:{long_link}` (empty owner for anonymous links),
/// hex-encoded and truncated to 8 characters. The derivation is
/// deterministic: the same owner shortening the same URL always yields the
/// same code, which is what makes the fail-fast collision policy in the
/// lifecycle service meaningful (retrying the same input would collide
/// identically). Scoping the input by owner keeps distinct owners of the
/// same URL from deriving each other's code while the code namespace
/// itself stays global.
///
/// # Examples
///
/// ```
/// use linkcut::utils::code_generator::derive_code;
///
/// let code = derive_code("https://example.com/x", None);
/// assert_eq!(code.len(), 8);
/// assert_eq!(code, derive_code("https://example.com/x", None));
/// ```
pub fn derive_code(long_link: &str, owner_id: Option<Uuid>) -> String {
    let mut hasher = Sha256::new();
    if let Some(owner) = owner_id {
        hasher.update(owner.to_string().as_bytes());
    }
    hasher.update(b":");
    hasher.update(long_link.as_bytes());

    hex::encode(hasher.finalize())[..CODE_LENGTH].to_string()
}

/// Validates a user-provided custom alias.
///
/// Any non-empty string is a valid candidate; whether it is available is
/// the lifecycle service's uniqueness check, not a shape concern.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for the empty string.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        return Err(AppError::bad_request(
            "Custom alias cannot be empty",
            json!({}),
        ));
    }

    Ok(())
}
