//! Draft/commit state machine.
//!
//! ```text
//! Idle --live edit--> Editing --blur--> Committing --> Idle
//!   ^                    |  ^                            |
//!   |                    +--+ (more edits re-arm timer)  |
//!   +------------------------------------------------------+
//! ```
//!
//! Live edits update the draft and arm the debouncer; the debounced `Change` is picked up
//! by [`SyncEngine::poll`]. Blur cancels the timer and commits synchronously. Selections
//! (adapters that commit on edit) skip `Editing` and commit at once. Host resets bypass
//! all of it and overwrite the draft.

use super::adapter::ValueAdapter;
use super::debounce::{Debouncer, DEBOUNCE_WINDOW};
use crate::value::Value;
use std::fmt;
use std::time::{Duration, Instant};

/// Phase of the draft/commit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    /// Draft diverged from the last commit; debounce timer armed
    Editing,
    /// Blur in progress; only observable from inside a commit
    Committing,
}

/// Outgoing notifications for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// `onChange`: debounced during editing, synchronous on commit
    Change(Value),
    /// `onEndEditing`: a commit whose value differs from the previous commit
    EndEditing(Value),
}

impl Emission {
    pub fn value(&self) -> &Value {
        match self {
            Emission::Change(v) | Emission::EndEditing(v) => v,
        }
    }
}

/// The three values the engine reconciles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftState {
    /// Mirrors the host-controlled value
    pub committed: Value,
    /// In-flight edit
    pub draft: Value,
    /// Value as of the last commit; decides whether a commit was a real edit
    pub last_committed: Value,
}

impl DraftState {
    fn new(initial: Value) -> Self {
        Self {
            committed: initial.clone(),
            draft: initial.clone(),
            last_committed: initial,
        }
    }

    fn reset(&mut self, value: Value) {
        *self = Self::new(value);
    }
}

/// Per-control synchronization state.
pub struct SyncEngine {
    adapter: Box<dyn ValueAdapter>,
    state: SyncState,
    values: DraftState,
    debouncer: Debouncer<Value>,
    dirty: bool,
    locked: bool,
    /// Last value handed to the host, so its echo is not mistaken for a reset
    last_emitted: Option<Value>,
}

impl SyncEngine {
    /// Create an engine in `Idle` with every value set to `initial`.
    pub fn new(adapter: Box<dyn ValueAdapter>, initial: Value) -> Self {
        Self::with_window(adapter, initial, DEBOUNCE_WINDOW)
    }

    /// Create an engine with a custom debounce window (useful for tests).
    pub fn with_window(adapter: Box<dyn ValueAdapter>, initial: Value, window: Duration) -> Self {
        Self {
            adapter,
            state: SyncState::Idle,
            values: DraftState::new(initial),
            debouncer: Debouncer::new(window),
            dirty: false,
            locked: false,
            last_emitted: None,
        }
    }

    /// Swap the normalization when the control is reclassified. Draft and commit
    /// history are kept.
    pub fn set_adapter(&mut self, adapter: Box<dyn ValueAdapter>) {
        self.adapter = adapter;
    }

    /// Suppress (or re-enable) edit handling for read-only and disabled controls.
    pub fn set_locked(&mut self, locked: bool) {
        if locked && !self.locked {
            self.debouncer.cancel_pending();
            self.state = SyncState::Idle;
        }
        self.locked = locked;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Apply a live edit. Returns the emissions a discrete selection commits; ordinary
    /// edits return nothing and surface later through [`poll`](Self::poll).
    pub fn on_live_edit(&mut self, raw: Value, now: Instant) -> Vec<Emission> {
        if self.locked {
            return Vec::new();
        }

        let value = self.adapter.live_value(raw);

        if self.adapter.commits_on_edit() {
            self.values.draft = value.clone();
            return self.commit(value);
        }

        self.values.draft = value.clone();
        self.dirty = true;
        if self.state != SyncState::Editing {
            log::debug!("sync: {:?} -> Editing", self.state);
        }
        self.state = SyncState::Editing;
        log::trace!("sync: debounce armed with {value:?}");
        self.debouncer.schedule(value, now);
        Vec::new()
    }

    /// Commit on focus loss. Read-only controls ignore blur entirely.
    pub fn on_blur(&mut self) -> Vec<Emission> {
        if self.locked {
            return Vec::new();
        }

        let value = self.adapter.commit_value(&self.values.draft);
        self.commit(value)
    }

    /// The host pushed a new value while mounted. Host resets are authoritative: the
    /// draft is overwritten, pending propagation dropped and nothing is emitted.
    pub fn on_external_value_change(&mut self, value: Value) {
        if value == self.values.committed {
            return;
        }

        if self.last_emitted.as_ref() == Some(&value) {
            // The host caught up with a value we sent it.
            self.values.committed = value;
            return;
        }

        log::debug!("sync: external reset to {value:?}");
        self.debouncer.cancel_pending();
        self.values.reset(value);
        self.dirty = false;
        self.state = SyncState::Idle;
    }

    /// Fire the debounced `Change` if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<Emission> {
        let value = self.debouncer.poll(now)?;
        self.last_emitted = Some(value.clone());
        Some(Emission::Change(value))
    }

    pub fn current_draft(&self) -> &Value {
        &self.values.draft
    }

    pub fn values(&self) -> &DraftState {
        &self.values
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// True from the first live edit until the next `EndEditing` or host reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// When the pending debounced `Change` is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn commit(&mut self, value: Value) -> Vec<Emission> {
        self.debouncer.cancel_pending();
        self.state = SyncState::Committing;

        let mut emissions = vec![Emission::Change(value.clone())];
        if value != self.values.last_committed {
            emissions.push(Emission::EndEditing(value.clone()));
            self.dirty = false;
        }

        self.values.last_committed = value.clone();
        self.values.committed = value.clone();
        self.values.draft = value.clone();
        self.last_emitted = Some(value);

        log::debug!("sync: Committing -> Idle ({} emissions)", emissions.len());
        self.state = SyncState::Idle;
        emissions
    }
}

impl fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncEngine")
            .field("state", &self.state)
            .field("values", &self.values)
            .field("debouncer", &self.debouncer)
            .field("dirty", &self.dirty)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}
