#![allow(dead_code)]

//! In-memory collaborators backing the handler tests.
//!
//! The handler tests exercise the full HTTP surface against the real
//! services; only the store, cache and scheduler boundaries are replaced
//! with in-memory implementations of the public traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use linkcut::application::services::{AuthService, CacheTtls, LinkService};
use linkcut::domain::entities::{Link, NewLink};
use linkcut::domain::repositories::{LinkRepository, TokenRepository};
use linkcut::error::AppError;
use linkcut::infrastructure::cache::{CacheResult, CacheService};
use linkcut::infrastructure::scheduler::{DeferredJob, Scheduler, SchedulerError};
use linkcut::state::AppState;
use serde_json::json;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

/// In-memory link store mirroring the Postgres schema's uniqueness rules.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a row directly, bypassing the service-level checks.
    pub fn seed(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }

    pub fn get_by_code(&self, short_link: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_link == short_link)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_long_link(
        &self,
        long_link: &str,
        owner_id: Option<Uuid>,
    ) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.long_link == long_link && l.owner_id == owner_id)
            .cloned())
    }

    async fn find_any_by_long_link(&self, long_link: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.long_link == long_link)
            .cloned())
    }

    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get_by_code(short_link))
    }

    async fn find_by_short_link_and_owner(
        &self,
        short_link: &str,
        owner_id: Uuid,
    ) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_link == short_link && l.owner_id == Some(owner_id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn insert(&self, new_link: NewLink) -> Result<i64, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_link == new_link.short_link) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_link_key" }),
            ));
        }
        if links
            .iter()
            .any(|l| l.long_link == new_link.long_link && l.owner_id == new_link.owner_id)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_long_link_owner_key" }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        links.push(Link {
            id,
            long_link: new_link.long_link,
            short_link: new_link.short_link,
            is_authenticated: new_link.is_authenticated,
            owner_id: new_link.owner_id,
            created_at: new_link.created_at,
            last_accessed_at: new_link.created_at,
            access_count: 0,
            expires_at: new_link.expires_at,
        });

        Ok(id)
    }

    async fn increment_access(&self, short_link: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.short_link == short_link) {
            Some(link) => {
                link.access_count += 1;
                link.last_accessed_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_long_link(
        &self,
        short_link: &str,
        new_long_link: &str,
    ) -> Result<Option<Link>, AppError> {
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.short_link == short_link) {
            Some(link) => {
                link.long_link = new_long_link.to_string();
                link.last_accessed_at = Utc::now();
                Ok(Some(link.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, short_link: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.short_link != short_link);
        Ok(links.len() < before)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        Ok(links.len() < before)
    }

    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.expires_at.is_some_and(|e| e < now))
            .cloned()
            .collect())
    }

    async fn list_with_expiry(&self) -> Result<Vec<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.expires_at.is_some())
            .cloned()
            .collect())
    }
}

/// In-memory cache. TTLs are accepted and ignored; entries live until
/// invalidated, which is exactly what the coherence tests need.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn invalidate_all(&self) -> CacheResult<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Scheduler that records every job instead of running it.
#[derive(Default)]
pub struct RecordingScheduler {
    pub scheduled: Mutex<Vec<(DeferredJob, DateTime<Utc>)>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled_jobs(&self) -> Vec<(DeferredJob, DateTime<Utc>)> {
        self.scheduled.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn schedule(
        &self,
        job: DeferredJob,
        fire_at: DateTime<Utc>,
    ) -> Result<(), SchedulerError> {
        self.scheduled.lock().unwrap().push((job, fire_at));
        Ok(())
    }
}

/// Token store seeded with raw tokens; hashes are computed the same way
/// the auth service computes them.
#[derive(Default)]
pub struct StubTokenRepository {
    by_hash: Mutex<HashMap<String, Uuid>>,
}

impl StubTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_token(&self, token: &str, user_id: Uuid) {
        self.by_hash
            .lock()
            .unwrap()
            .insert(token_hash(token), user_id);
    }
}

#[async_trait]
impl TokenRepository for StubTokenRepository {
    async fn find_user_by_hash(&self, hash: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.by_hash.lock().unwrap().get(hash).copied())
    }

    async fn touch_last_used(&self, _hash: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn token_hash(token: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_SIGNING_SECRET.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub struct TestContext {
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub cache: Arc<MemoryCache>,
    pub scheduler: Arc<RecordingScheduler>,
    pub tokens: Arc<StubTokenRepository>,
}

/// Builds an [`AppState`] over in-memory collaborators and hands back the
/// collaborators for inspection.
pub fn create_test_state() -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let scheduler = Arc::new(RecordingScheduler::new());
    let tokens = Arc::new(StubTokenRepository::new());

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        cache.clone(),
        scheduler.clone(),
        CacheTtls::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        tokens.clone(),
        TEST_SIGNING_SECRET.to_string(),
    ));

    // Never connected: the handler tests exercise no raw pool paths.
    let db = Arc::new(
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/linkcut_test")
            .expect("lazy pool from static URL"),
    );

    let state = AppState {
        link_service,
        auth_service,
        cache: cache.clone(),
        db,
    };

    TestContext {
        state,
        links,
        cache,
        scheduler,
        tokens,
    }
}

/// Seeds a link row directly into the store.
pub fn seed_link(
    links: &InMemoryLinkRepository,
    id: i64,
    short_link: &str,
    long_link: &str,
    owner_id: Option<Uuid>,
    expires_at: Option<DateTime<Utc>>,
) -> Link {
    let now = Utc::now();
    let link = Link {
        id,
        long_link: long_link.to_string(),
        short_link: short_link.to_string(),
        is_authenticated: owner_id.is_some(),
        owner_id,
        created_at: now,
        last_accessed_at: now,
        access_count: 0,
        expires_at,
    };
    links.seed(link.clone());
    link
}
