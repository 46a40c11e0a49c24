//! Per-mode value normalization.
//!
//! The engine is the same for every mode; what differs is how a raw edit becomes a draft
//! and how a draft becomes a commit. Those two steps are the [`ValueAdapter`] seam.

use crate::config::PrepareNumber;
use crate::mask::MaskSpec;
use crate::mode::Mode;
use crate::value::{parse_number, Value};

/// Mode-specific normalization used by the synchronization engine.
pub trait ValueAdapter: Send {
    /// Value a live edit puts into the draft.
    fn live_value(&self, raw: Value) -> Value;

    /// Value committed on blur, computed from the current draft.
    fn commit_value(&self, draft: &Value) -> Value;

    /// Discrete edits (selections) commit immediately instead of waiting for blur.
    fn commits_on_edit(&self) -> bool {
        false
    }
}

/// Plain text, multiline text and the embedded editor: values pass through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAdapter;

impl ValueAdapter for TextAdapter {
    fn live_value(&self, raw: Value) -> Value {
        raw
    }

    fn commit_value(&self, draft: &Value) -> Value {
        draft.clone()
    }
}

/// Numeric mode: optional `prepare_number` hook, zero-preserving fallback.
#[derive(Default)]
pub struct NumberAdapter {
    prepare: Option<PrepareNumber>,
}

impl NumberAdapter {
    pub fn new(prepare: Option<PrepareNumber>) -> Self {
        Self { prepare }
    }

    /// The single numeric rule used on both the live and the blur path.
    ///
    /// A truthy `prepare_number` result wins. Otherwise the raw value is kept when it is
    /// truthy, numeric zero or the empty string, and anything else becomes `Empty`.
    pub fn normalize(&self, raw: &Value) -> Value {
        if let Some(prepare) = &self.prepare {
            let prepared = prepare(raw);
            if prepared.is_truthy() {
                return prepared;
            }
        }

        let coerced = coerce_numeric(raw);
        if coerced.is_truthy() || coerced.is_zero() || coerced.is_empty_string() {
            coerced
        } else {
            Value::Empty
        }
    }
}

/// Numeric text becomes a number; text that is not a number is a type mismatch and
/// carries no value.
fn coerce_numeric(raw: &Value) -> Value {
    match raw {
        Value::Text(s) if s.is_empty() => Value::Text(String::new()),
        Value::Text(s) => parse_number(s).map_or(Value::Empty, Value::Number),
        Value::Number(n) if n.is_finite() => Value::Number(*n),
        _ => Value::Empty,
    }
}

impl ValueAdapter for NumberAdapter {
    fn live_value(&self, raw: Value) -> Value {
        self.normalize(&raw)
    }

    fn commit_value(&self, draft: &Value) -> Value {
        self.normalize(draft)
    }
}

/// Masked mode: raw text is conformed to the mask and a blank pattern means `Empty`.
#[derive(Debug, Clone)]
pub struct MaskAdapter {
    spec: MaskSpec,
}

impl MaskAdapter {
    pub fn new(spec: MaskSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &MaskSpec {
        &self.spec
    }
}

impl ValueAdapter for MaskAdapter {
    fn live_value(&self, raw: Value) -> Value {
        match raw {
            Value::Empty => Value::Empty,
            Value::Text(s) => self.spec.edit_value(&s),
            Value::Number(n) => self.spec.edit_value(&n.to_string()),
        }
    }

    fn commit_value(&self, draft: &Value) -> Value {
        match draft {
            Value::Text(s) if self.spec.is_blank(s) => Value::Empty,
            other => other.clone(),
        }
    }
}

/// Selector mode: a selection is final the moment it happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectAdapter;

impl ValueAdapter for SelectAdapter {
    fn live_value(&self, raw: Value) -> Value {
        raw
    }

    fn commit_value(&self, draft: &Value) -> Value {
        draft.clone()
    }

    fn commits_on_edit(&self) -> bool {
        true
    }
}

/// Build the adapter for a classified mode. `mask` is only consulted in masked mode; a
/// missing spec there falls back to plain text.
pub fn adapter_for(
    mode: Mode,
    mask: Option<MaskSpec>,
    prepare_number: Option<PrepareNumber>,
) -> Box<dyn ValueAdapter> {
    match (mode, mask) {
        (Mode::Numeric, _) => Box::new(NumberAdapter::new(prepare_number)),
        (Mode::Masked, Some(spec)) => Box::new(MaskAdapter::new(spec)),
        (Mode::Selector, _) => Box::new(SelectAdapter),
        _ => Box::new(TextAdapter),
    }
}
