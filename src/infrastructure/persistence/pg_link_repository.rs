//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, long_link, short_link, is_authenticated, owner_id, \
     created_at, last_accessed_at, access_count, expires_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Every method issues exactly one SQL statement; atomicity comes from the
/// store, not from client-side locking.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_long_link(
        &self,
        long_link: &str,
        owner_id: Option<Uuid>,
    ) -> Result<Option<Link>, AppError> {
        // owner_id IS NOT DISTINCT FROM $2 matches NULL = NULL, which a
        // plain equality comparison would not.
        let row = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE long_link = $1 AND owner_id IS NOT DISTINCT FROM $2"
        ))
        .bind(long_link)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_any_by_long_link(&self, long_link: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE long_link = $1 LIMIT 1"
        ))
        .bind(long_link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_link = $1"
        ))
        .bind(short_link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_short_link_and_owner(
        &self,
        short_link: &str,
        owner_id: Uuid,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_link = $1 AND owner_id = $2"
        ))
        .bind(short_link)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn insert(&self, new_link: NewLink) -> Result<i64, AppError> {
        // last_accessed_at is initialized equal to created_at; access_count
        // always starts at zero.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO links \
             (long_link, short_link, is_authenticated, owner_id, \
              created_at, last_accessed_at, access_count, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $5, 0, $6) \
             RETURNING id",
        )
        .bind(&new_link.long_link)
        .bind(&new_link.short_link)
        .bind(new_link.is_authenticated)
        .bind(new_link.owner_id)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn increment_access(&self, short_link: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE links \
             SET access_count = access_count + 1, last_accessed_at = now() \
             WHERE short_link = $1",
        )
        .bind(short_link)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_long_link(
        &self,
        short_link: &str,
        new_long_link: &str,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, Link>(&format!(
            "UPDATE links SET long_link = $2, last_accessed_at = now() \
             WHERE short_link = $1 \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(short_link)
        .bind(new_long_link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn delete(&self, short_link: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE short_link = $1")
            .bind(short_link)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE expires_at IS NOT NULL AND expires_at < $1 \
             ORDER BY expires_at"
        ))
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn list_with_expiry(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE expires_at IS NOT NULL \
             ORDER BY expires_at"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
