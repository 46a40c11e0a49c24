//! Value synchronization engine.
//!
//! Reconciles the host-controlled value, the in-flight draft, the debounced live channel
//! and the blur commit. [`engine::SyncEngine`] owns the state machine; the per-mode
//! normalization lives behind [`adapter::ValueAdapter`]; the only timer is the
//! [`debounce::Debouncer`].

pub mod adapter;
pub mod debounce;
pub mod engine;

pub use adapter::{adapter_for, MaskAdapter, NumberAdapter, SelectAdapter, TextAdapter, ValueAdapter};
pub use debounce::{Debouncer, TaskHandle, DEBOUNCE_WINDOW};
pub use engine::{DraftState, Emission, SyncEngine, SyncState};
