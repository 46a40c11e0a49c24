//! Control surface: the dispatcher between a classified mode and the rendering toolkit.
//!
//! [`UniversalInput`] owns one control's state. It routes toolkit events into the
//! synchronization engine and describes, through a [`RenderPlan`], the single widget the
//! toolkit should draw plus the trailing affordances.

pub mod control;
pub mod widget;

pub use control::{ControlEvent, KeyOutcome, KeyPress, UniversalInput};
pub use widget::{Affordance, AffordanceRegion, RenderPlan, Widget};
