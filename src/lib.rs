//! # universal-input - One Form Control for Every Kind of Value
//!
//! A single configurable form-input control that behaves the same whether it shows a
//! number spinner, a masked text box, an option selector, a multiline area or an
//! embedded code editor. Whatever the presentation, typed edits are debounced into
//! `Change` notifications and focus loss commits the value.
//!
//! ## Features
//!
//! - **Mode Classification**: Configuration hints resolve to exactly one presentation
//! - **Input Masks**: Compact mask grammar with validation and placeholder derivation
//! - **Draft/Commit Sync**: 200ms debounce during editing, synchronous commit on blur
//! - **Process Indicator**: "Ready to send" and busy affordances
//! - **Change Hub**: Process-wide fan-out of values changed by other sessions
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`value`] - The `string | number | empty` control value
//! - [`mask`] - Mask compilation and live conforming
//! - [`mode`] - Mode classification
//! - [`sync`] - Debouncer, value adapters and the synchronization engine
//! - [`surface`] - The [`UniversalInput`] control and its render plan
//! - [`hub`], [`form`], [`runtime`] - Host-side wiring

// Core modules
pub mod error;
pub mod value;

// Control building blocks
pub mod config;
pub mod mask;
pub mod mode;
pub mod overlay;
pub mod sync;

// The control itself
pub mod surface;

// Host-side wiring
pub mod form;
pub mod hub;
pub mod runtime;
pub mod script;

// Re-export commonly used types for convenience
pub use error::{Result, UniversalInputError};

// Public API surface for external usage
pub use config::{ControlConfig, Hooks, InputType, SelectEntry, SelectOption};
pub use form::{Form, FormEvent, FormEventKind};
pub use hub::ChangeHub;
pub use mask::{compile, MaskSpec};
pub use mode::{classify, Mode};
pub use runtime::{spawn_control, ControlCommand, ControlHandle};
pub use script::{parse_script, Step};
pub use surface::{ControlEvent, RenderPlan, UniversalInput, Widget};
pub use sync::{Emission, SyncEngine, DEBOUNCE_WINDOW};
pub use value::Value;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
