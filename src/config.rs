//! Per-control configuration.
//!
//! [`ControlConfig`] is the declarative, per-render data the host hands a control: mode
//! hints, the host value, and presentation flags. Behavioral hooks that cannot be data
//! (`prepare_number`, `formatter`) live separately in [`Hooks`].
//!
//! With the `config` feature the data part deserializes from TOML, and [`form`] loads
//! whole form definitions.

#[cfg(feature = "config")]
pub mod form;

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Default minimum row count of a multiline text area.
pub const DEFAULT_MIN_ROWS: u16 = 1;
/// Default maximum row count of a multiline text area.
pub const DEFAULT_MAX_ROWS: u16 = 20;
/// Default row count of the embedded editor.
pub const DEFAULT_EDITOR_ROWS: u16 = 4;

/// The `type` hint. Only `number` changes classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum InputType {
    #[default]
    Text,
    Number,
}

/// A selectable option.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
pub struct SelectOption {
    pub value: Value,
    #[cfg_attr(feature = "config", serde(default))]
    pub label: Option<String>,
    #[cfg_attr(feature = "config", serde(default))]
    pub sub_label: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            label: None,
            sub_label: None,
        }
    }

    pub fn labeled(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
            sub_label: None,
        }
    }

    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.sub_label = Some(sub_label.into());
        self
    }

    /// Label shown in the dropdown; falls back to the value itself.
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.value.to_string())
    }
}

/// An entry of the option list: a plain option or a labelled group of options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize, serde::Serialize),
    serde(untagged)
)]
pub enum SelectEntry {
    Group {
        value: Value,
        label: String,
        options: Vec<SelectOption>,
    },
    Option(SelectOption),
}

impl SelectEntry {
    /// Every selectable option under this entry.
    pub fn options(&self) -> Vec<&SelectOption> {
        match self {
            SelectEntry::Option(option) => vec![option],
            SelectEntry::Group { options, .. } => options.iter().collect(),
        }
    }
}

impl From<SelectOption> for SelectEntry {
    fn from(option: SelectOption) -> Self {
        SelectEntry::Option(option)
    }
}

/// Declarative configuration of one control for one render cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct ControlConfig {
    /// `type`: `number` selects the numeric mode
    #[cfg_attr(feature = "config", serde(rename = "type"))]
    pub input_type: InputType,
    /// Mask pattern; invalid masks are ignored
    pub mask: Option<String>,
    /// Embedded editor hint
    pub script: bool,
    /// Option list; non-empty selects the selector mode
    pub options: Vec<SelectEntry>,
    /// Multiline text area hint
    pub multiline: bool,
    /// The host renders its own nested content inside the control
    pub has_children: bool,

    /// Host-controlled value
    pub value: Value,
    pub disabled: bool,
    pub read_only: bool,

    /// Show the "ready to send" indicator after live edits
    pub eventable: bool,
    /// Busy flag supplied by the host's pending-operation tracker
    pub in_process: bool,

    /// Unshifted Tab inserts a tab character instead of moving focus
    pub allow_tabs: bool,
    pub auto_focus: bool,
    pub placeholder: Option<String>,
    pub min_rows: u16,
    pub max_rows: u16,
    /// Row count of the embedded editor
    pub rows: u16,
    /// Host affordances rendered after the input, in order
    pub actions: Vec<String>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            input_type: InputType::Text,
            mask: None,
            script: false,
            options: Vec::new(),
            multiline: false,
            has_children: false,
            value: Value::Empty,
            disabled: false,
            read_only: false,
            eventable: false,
            in_process: false,
            allow_tabs: false,
            auto_focus: false,
            placeholder: None,
            min_rows: DEFAULT_MIN_ROWS,
            max_rows: DEFAULT_MAX_ROWS,
            rows: DEFAULT_EDITOR_ROWS,
            actions: Vec::new(),
        }
    }
}

impl ControlConfig {
    /// A plain text control.
    pub fn text() -> Self {
        Self::default()
    }

    /// A numeric control.
    pub fn number() -> Self {
        Self {
            input_type: InputType::Number,
            ..Self::default()
        }
    }

    /// A masked control.
    pub fn masked(mask: impl Into<String>) -> Self {
        Self {
            mask: Some(mask.into()),
            ..Self::default()
        }
    }

    /// A selector over the given entries.
    pub fn select<I, E>(options: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SelectEntry>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A multiline text area.
    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    /// An embedded editor.
    pub fn script() -> Self {
        Self {
            script: true,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn eventable(mut self) -> Self {
        self.eventable = true;
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Edits are suppressed when the control is disabled or read-only.
    pub fn is_locked(&self) -> bool {
        self.disabled || self.read_only
    }

    /// All selectable options, groups flattened.
    pub fn flat_options(&self) -> Vec<&SelectOption> {
        self.options.iter().flat_map(SelectEntry::options).collect()
    }
}

/// Numeric normalizer: maps a raw numeric edit to the value to keep.
pub type PrepareNumber = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
/// Display formatter for read-only numeric controls.
pub type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Behavioral hooks supplied by the host.
#[derive(Clone, Default)]
pub struct Hooks {
    pub prepare_number: Option<PrepareNumber>,
    pub formatter: Option<Formatter>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prepare_number(
        mut self,
        prepare: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.prepare_number = Some(Arc::new(prepare));
        self
    }

    pub fn with_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("prepare_number", &self.prepare_number.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
