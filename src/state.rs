//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::cache::CacheService;

/// Application state shared across all request handlers.
///
/// Services are constructed once at startup with their collaborators
/// injected explicitly; there is no ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
    pub db: Arc<PgPool>,
}
