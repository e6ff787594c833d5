//! Tokio timer-based scheduler implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::service::{DeferredJob, Scheduler, SchedulerError};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Scheduler that runs each deferred job on its own detached Tokio task.
///
/// A scheduled job sleeps until its fire time and then executes against
/// the link repository. Jobs scheduled with a fire time in the past run
/// immediately. Pending jobs live only in this process; durability across
/// restarts comes from [`reschedule_pending_deletions`] re-scanning the
/// store at startup, combined with idempotent job bodies.
pub struct TokioScheduler {
    links: Arc<dyn LinkRepository>,
}

impl TokioScheduler {
    /// Creates a scheduler executing jobs against the given repository.
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    async fn run_job(links: Arc<dyn LinkRepository>, job: DeferredJob) {
        match job {
            DeferredJob::DeleteLink { link_id } => {
                match links.delete_by_id(link_id).await {
                    Ok(true) => info!(link_id, "Expired link deleted"),
                    // Already gone: duplicate firing or manual deletion.
                    Ok(false) => debug!(link_id, "Expired link was already deleted"),
                    Err(e) => error!(link_id, error = %e, "Deferred link deletion failed"),
                }
            }
        }
    }
}

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn schedule(
        &self,
        job: DeferredJob,
        fire_at: DateTime<Utc>,
    ) -> Result<(), SchedulerError> {
        let links = self.links.clone();
        let delay = (fire_at - Utc::now()).to_std().unwrap_or_default();

        debug!(?job, %fire_at, "Scheduling deferred job");

        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Self::run_job(links, job).await;
        });

        Ok(())
    }
}

/// Re-schedules a deletion job for every stored link that carries an
/// expiry.
///
/// Called once at startup so that jobs scheduled before the last process
/// restart are not lost. Past-due links fire immediately; links whose job
/// is also still pending in another instance are covered by the idempotent
/// job body.
///
/// # Errors
///
/// Returns [`AppError::Internal`] when the listing query fails.
pub async fn reschedule_pending_deletions(
    links: &Arc<dyn LinkRepository>,
    scheduler: &Arc<dyn Scheduler>,
) -> Result<usize, AppError> {
    let pending = links.list_with_expiry().await?;
    let count = pending.len();

    for link in pending {
        let Some(expires_at) = link.expires_at else {
            continue;
        };

        if let Err(e) = scheduler
            .schedule(DeferredJob::DeleteLink { link_id: link.id }, expires_at)
            .await
        {
            warn!(link_id = link.id, error = %e, "Failed to re-schedule deletion");
        }
    }

    if count > 0 {
        info!(count, "Re-scheduled pending link deletions");
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::scheduler::MockScheduler;
    use chrono::Duration;
    use tokio::sync::mpsc;

    fn expiring_link(id: i64, expires_at: DateTime<Utc>) -> Link {
        let now = Utc::now();
        Link {
            id,
            long_link: format!("https://example.com/{id}"),
            short_link: format!("code{id:04}"),
            is_authenticated: false,
            owner_id: None,
            created_at: now,
            last_accessed_at: now,
            access_count: 0,
            expires_at: Some(expires_at),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_delete_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| {
                tx.send(()).unwrap();
                Ok(true)
            });

        let scheduler = TokioScheduler::new(Arc::new(mock_repo));

        scheduler
            .schedule(
                DeferredJob::DeleteLink { link_id: 7 },
                Utc::now() + Duration::seconds(30),
            )
            .await
            .unwrap();

        // Paused clock: the runtime auto-advances past the timer.
        rx.recv().await.expect("job should have fired");
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_due_job_fires_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_delete_by_id().times(1).returning(move |_| {
            tx.send(()).unwrap();
            Ok(true)
        });

        let scheduler = TokioScheduler::new(Arc::new(mock_repo));

        scheduler
            .schedule(
                DeferredJob::DeleteLink { link_id: 1 },
                Utc::now() - Duration::hours(1),
            )
            .await
            .unwrap();

        rx.recv().await.expect("job should have fired");
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_is_idempotent_when_link_already_deleted() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_delete_by_id().times(1).returning(move |_| {
            tx.send(()).unwrap();
            Ok(false)
        });

        let scheduler = TokioScheduler::new(Arc::new(mock_repo));

        scheduler
            .schedule(DeferredJob::DeleteLink { link_id: 1 }, Utc::now())
            .await
            .unwrap();

        // A missing row is a successful no-op, not an error.
        rx.recv().await.expect("job should have run");
    }

    #[tokio::test]
    async fn test_reschedule_pending_schedules_every_expiring_link() {
        let now = Utc::now();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_list_with_expiry().times(1).returning(move || {
            Ok(vec![
                expiring_link(1, now - Duration::hours(1)),
                expiring_link(2, now + Duration::hours(1)),
            ])
        });

        let mut mock_scheduler = MockScheduler::new();
        mock_scheduler
            .expect_schedule()
            .times(2)
            .returning(|_, _| Ok(()));

        let links: Arc<dyn LinkRepository> = Arc::new(mock_repo);
        let scheduler: Arc<dyn Scheduler> = Arc::new(mock_scheduler);

        let count = reschedule_pending_deletions(&links, &scheduler)
            .await
            .unwrap();

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_reschedule_pending_with_no_expiring_links() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_list_with_expiry()
            .times(1)
            .returning(|| Ok(vec![]));

        let mock_scheduler = MockScheduler::new();

        let links: Arc<dyn LinkRepository> = Arc::new(mock_repo);
        let scheduler: Arc<dyn Scheduler> = Arc::new(mock_scheduler);

        let count = reschedule_pending_deletions(&links, &scheduler)
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}
