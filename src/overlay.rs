//! Process indicator overlay.
//!
//! A control shows a small "pending" affordance after the host's own actions when it has
//! unsent edits (dirty) or when the host reports an operation in flight (busy). Busy wins
//! the presentation when both hold.

/// Presentation of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    /// Edits are ready to be sent
    Active,
    /// The host is processing
    Busy,
}

/// Whether and how to show the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub show: bool,
    pub style: IndicatorStyle,
}

impl Indicator {
    /// Tooltip text for the indicator.
    pub fn title(&self) -> &'static str {
        match self.style {
            IndicatorStyle::Active => "ready to send",
            IndicatorStyle::Busy => "",
        }
    }
}

/// Decide the indicator from the dirty and busy flags.
pub fn should_show_indicator(dirty: bool, busy: bool) -> Indicator {
    Indicator {
        show: dirty || busy,
        style: if busy {
            IndicatorStyle::Busy
        } else {
            IndicatorStyle::Active
        },
    }
}
