//! Identity resolution for API requests.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Resolves bearer tokens to caller identities.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the
/// database cannot verify or forge tokens without the server-side secret.
///
/// Identity is optional by design: a missing, unknown or revoked token
/// resolves to the anonymous identity rather than rejecting the request.
/// Downstream code receives only the resolved `Option<Uuid>` and never
/// sees credentials.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves an optional bearer token to a caller identity.
    ///
    /// Returns `None` when no token was presented or the token does not
    /// match any active credential. On a successful match, updates the
    /// token's `last_used_at` timestamp on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_identity(&self, token: Option<&str>) -> Result<Option<Uuid>, AppError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let token_hash = self.hash_token(token);

        let Some(user_id) = self.repository.find_user_by_hash(&token_hash).await? else {
            return Ok(None);
        };

        let _ = self.repository.touch_last_used(&token_hash).await;

        Ok(Some(user_id))
    }
}
