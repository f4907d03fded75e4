//! Schedulable units of work bound to lifecycle triggers.
//!
//! A [`Task`] wraps a plain closure plus scheduling state. [`Task::issue`]
//! hands the closure to the host's tokio runtime; the body then runs on a
//! scheduler worker, never on the caller. This binding defines the 0/0
//! semantics the scheduler contract leaves open: a zero delay fires
//! immediately, a zero period means exactly one run.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use guildvault_core::codec::Record;

use crate::error::{HostError, Result};
use crate::hook::{save_vault, SharedVault};
use crate::store::FileStore;

/// Process-lifecycle trigger points that activate matching tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Fired once after all hooks have loaded their data.
    OnEnable,
    /// Declared extension point; no built-in task uses it yet.
    OnDisable,
}

/// Task body. Runs on the scheduler's execution context.
pub type TaskFn = Arc<dyn Fn() + Send + Sync>;

/// A named, schedulable unit of work owned by one hook.
pub struct Task {
    name: String,
    trigger: Trigger,
    body: TaskFn,
    schedule: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .field("scheduled", &self.is_scheduled())
            .finish_non_exhaustive()
    }
}

impl Task {
    /// Create an unscheduled task.
    #[must_use]
    pub fn new(name: impl Into<String>, trigger: Trigger, body: TaskFn) -> Self {
        Self {
            name: name.into(),
            trigger,
            body,
            schedule: None,
        }
    }

    /// The autosave task: OnEnable-bound, body saves the owning hook's
    /// vault through the store.
    #[must_use]
    pub fn autosave<T>(hook: &str, vault: SharedVault<T>, store: Arc<FileStore>) -> Self
    where
        T: Record + Send + Sync + 'static,
    {
        let hook_name = hook.to_owned();
        Self::new(
            "autosave",
            Trigger::OnEnable,
            Arc::new(move || {
                if let Err(error) = save_vault(&store, &hook_name, &vault) {
                    tracing::error!(hook = %hook_name, %error, "autosave failed");
                }
            }),
        )
    }

    /// Task name, used for the `tasks.<hook>.<task>` config lookup.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which lifecycle trigger launches this task.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// True while a schedule is live (issued and neither finished nor
    /// cancelled).
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.schedule.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Run the task body once, synchronously, on the calling context.
    pub fn run(&self) {
        (self.body)();
    }

    /// Request periodic execution from the host scheduler: first run
    /// after `delay`, then every `period`. A zero period runs the body
    /// exactly once. Returns immediately; the body executes on a
    /// scheduler worker.
    ///
    /// # Errors
    ///
    /// [`HostError::AlreadyScheduled`] if a live schedule exists.
    /// Re-issue is rejected rather than silently stacking schedules.
    pub fn issue(&mut self, scheduler: &Handle, delay: Duration, period: Duration) -> Result<()> {
        if self.is_scheduled() {
            return Err(HostError::AlreadyScheduled {
                task: self.name.clone(),
            });
        }

        debug!(task = %self.name, ?delay, ?period, "issuing task");
        let body = Arc::clone(&self.body);
        let handle = scheduler.spawn(async move {
            tokio::time::sleep(delay).await;
            body();
            if period.is_zero() {
                return;
            }
            loop {
                tokio::time::sleep(period).await;
                body();
            }
        });
        self.schedule = Some(handle);
        Ok(())
    }

    /// Stop future executions. A task that was never issued, or whose
    /// schedule already ended, is a tolerated no-op.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.schedule.take() {
            handle.abort();
            debug!(task = %self.name, "task cancelled");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: Arc<AtomicUsize>) -> Task {
        Task::new(
            "count",
            Trigger::OnEnable,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[tokio::test]
    async fn issued_task_runs_on_the_scheduler() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = counting_task(Arc::clone(&counter));

        task.issue(
            &Handle::current(),
            Duration::from_millis(5),
            Duration::from_millis(5),
        )
        .expect("issue");
        // Issue returns before the body has run.
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(counter.load(Ordering::SeqCst) >= 2, "task should recur");
        task.cancel();
    }

    #[tokio::test]
    async fn zero_period_runs_exactly_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = counting_task(Arc::clone(&counter));

        task.issue(&Handle::current(), Duration::ZERO, Duration::ZERO)
            .expect("issue");
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!task.is_scheduled(), "one-shot schedule should finish");
    }

    #[tokio::test]
    async fn reissue_with_live_schedule_is_rejected() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = counting_task(counter);

        task.issue(
            &Handle::current(),
            Duration::from_millis(50),
            Duration::from_millis(50),
        )
        .expect("issue");
        let err = task
            .issue(&Handle::current(), Duration::ZERO, Duration::ZERO)
            .expect_err("second issue");
        assert!(matches!(err, HostError::AlreadyScheduled { .. }));

        // Cancel, then re-issue is allowed again.
        task.cancel();
        task.issue(&Handle::current(), Duration::ZERO, Duration::ZERO)
            .expect("reissue after cancel");
        task.cancel();
    }

    #[tokio::test]
    async fn cancel_without_schedule_is_a_no_op() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = counting_task(counter);
        task.cancel();
        task.cancel();
        assert!(!task.is_scheduled());
    }

    #[tokio::test]
    async fn run_executes_the_body_synchronously() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = counting_task(Arc::clone(&counter));
        task.run();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
