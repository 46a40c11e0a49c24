//! Mode classification.
//!
//! A control carries a flat set of optional hints. [`classify`] reads them in a fixed
//! priority order and always lands on exactly one [`Mode`]; contradictory combinations
//! resolve to the highest-priority hint, and nothing at all resolves to plain text.

use crate::config::{ControlConfig, InputType};
use crate::mask;

/// The single active editing behavior of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Numeric,
    Masked,
    EmbeddedEditor,
    Selector,
    Multiline,
    /// Read-only container around host-rendered content
    Passive,
    Plain,
}

impl Mode {
    /// Classification order, highest priority first.
    pub const PRIORITY: [Mode; 7] = [
        Mode::Numeric,
        Mode::Masked,
        Mode::EmbeddedEditor,
        Mode::Selector,
        Mode::Multiline,
        Mode::Passive,
        Mode::Plain,
    ];

    /// Read-only numeric controls show a formatted label instead of a spinner.
    pub fn renders_static_label(self, config: &ControlConfig) -> bool {
        self == Mode::Numeric && config.read_only
    }

    /// Whether edits flow through the synchronization engine at all.
    pub fn is_interactive(self) -> bool {
        self != Mode::Passive
    }

    /// Short lowercase name used in logs and script output.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "numeric",
            Mode::Masked => "masked",
            Mode::EmbeddedEditor => "editor",
            Mode::Selector => "selector",
            Mode::Multiline => "multiline",
            Mode::Passive => "passive",
            Mode::Plain => "plain",
        }
    }

    fn matches(self, config: &ControlConfig) -> bool {
        match self {
            Mode::Numeric => config.input_type == InputType::Number,
            Mode::Masked => config
                .mask
                .as_deref()
                .is_some_and(|m| !m.is_empty() && mask::validate(m).is_ok()),
            Mode::EmbeddedEditor => config.script,
            Mode::Selector => !config.options.is_empty(),
            Mode::Multiline => config.multiline,
            Mode::Passive => config.has_children,
            Mode::Plain => true,
        }
    }
}

/// Pick the mode for a configuration. Total: never fails.
pub fn classify(config: &ControlConfig) -> Mode {
    Mode::PRIORITY
        .into_iter()
        .find(|mode| mode.matches(config))
        .unwrap_or(Mode::Plain)
}
