//! Mask compilation for phone-number style patterns.
//!
//! A mask mixes editable placeholder symbols (see [`format`]) with literal characters.
//! [`compile`] validates a mask and derives everything the masked mode needs from it: the
//! slot layout used by the live editing surface, the placeholder shown in an empty field,
//! and the sentinel that identifies a fully blank value.

pub mod compiler;
pub mod editor;
pub mod format;

pub use compiler::{compile, validate, MaskRejection, MaskSpec, Slot};
pub use format::{CharClass, BLANK, ESCAPE};
