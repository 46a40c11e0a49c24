//! Cancellable deferred single-shot task.
//!
//! At most one task is outstanding. Scheduling replaces the pending task (coalescing,
//! not queuing), and cancelling is idempotent. Time is passed in by the caller so the
//! debouncer works the same under a real clock, a tokio clock, or a test's virtual one.

use std::time::{Duration, Instant};

/// Delay between the last live edit and the propagated `Change`.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Identifies one scheduled task so a stale handle cannot cancel its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct PendingTask<T> {
    id: u64,
    value: T,
    due: Instant,
}

/// Holds the latest scheduled value until its deadline passes.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    next_id: u64,
    pending: Option<PendingTask<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
        }
    }

    pub fn with_default_window() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Arm the task with `value`, due one window after `now`. Any pending task is dropped.
    pub fn schedule(&mut self, value: T, now: Instant) -> TaskHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(PendingTask {
            id,
            value,
            due: now + self.window,
        });
        TaskHandle(id)
    }

    /// Cancel the task behind `handle`. Returns true when something was cancelled;
    /// cancelling twice, or after the task fired or was replaced, does nothing.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match &self.pending {
            Some(task) if task.id == handle.0 => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever is pending, returning its value.
    pub fn cancel_pending(&mut self) -> Option<T> {
        self.pending.take().map(|task| task.value)
    }

    /// Fire the pending task if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(task) if now >= task.due => self.pending.take().map(|task| task.value),
            _ => None,
        }
    }

    /// When the pending task is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|task| task.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::with_default_window()
    }
}
