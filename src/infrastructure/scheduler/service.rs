//! Scheduler trait and job types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors that can occur when handing a job to the runner.
///
/// Failures of the job body itself are logged by the runner and never
/// surfaced here; the core does not track job outcomes.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Failed to schedule job: {0}")]
    ScheduleFailed(String),
}

/// A unit of work to execute at a future time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredJob {
    /// Physically delete the link with this id. Deleting an id that no
    /// longer exists is a successful no-op, which makes duplicate firing
    /// and manual prior deletion safe.
    DeleteLink { link_id: i64 },
}

/// Trait for deferred job execution.
///
/// `schedule` returns as soon as the job is handed to the runner; the job
/// itself executes out of line from any request, at or after `fire_at`,
/// with at-least-once delivery. Implementations must accept `fire_at`
/// values in the past and run such jobs immediately.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Schedules `job` to run at or after `fire_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ScheduleFailed`] when the job cannot be
    /// handed to the runner. Callers treat this as a degraded condition to
    /// log, not a request failure: the lazy expiry check still hides the
    /// link once it expires.
    async fn schedule(&self, job: DeferredJob, fire_at: DateTime<Utc>)
    -> Result<(), SchedulerError>;
}
