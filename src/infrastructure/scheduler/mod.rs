//! Deferred-job scheduling for time-based link expiry.
//!
//! Provides a [`Scheduler`] trait with a Tokio timer-based implementation:
//! - [`TokioScheduler`] - spawns one detached timer task per job
//!
//! Job bodies are idempotent, so at-least-once delivery (duplicate firing,
//! re-scheduling after restart) is safe.

mod service;
mod tokio_scheduler;

pub use service::{DeferredJob, Scheduler, SchedulerError};
pub use tokio_scheduler::{TokioScheduler, reschedule_pending_deletions};

#[cfg(test)]
pub use service::MockScheduler;
