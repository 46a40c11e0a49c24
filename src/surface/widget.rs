//! Render plan types handed to the toolkit.

use crate::config::SelectEntry;
use crate::mode::Mode;
use crate::overlay::Indicator;
use crate::value::Value;

/// The one concrete widget a control renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    NumberSpinner {
        value: Value,
    },
    /// Read-only numeric display produced by the host formatter
    StaticLabel {
        text: String,
    },
    MaskedText {
        value: String,
        mask: String,
        placeholder: String,
        /// Every editable slot is filled
        complete: bool,
    },
    CodeEditor {
        value: String,
        rows: u16,
    },
    Select {
        value: Value,
        options: Vec<SelectEntry>,
        /// The current value is set but matches no option
        invalid_value: bool,
        searchable: bool,
    },
    TextArea {
        value: String,
        min_rows: u16,
        max_rows: u16,
    },
    /// Container around host-rendered children
    Passive,
    TextBox {
        value: String,
        placeholder: Option<String>,
    },
}

/// One item of the trailing affordance list.
#[derive(Debug, Clone, PartialEq)]
pub enum Affordance {
    /// Host-supplied action, opaque to the control
    Action(String),
    /// The process indicator, always last
    Indicator(Indicator),
}

/// The trailing affordance list and the space it reserves inside the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AffordanceRegion {
    pub items: Vec<Affordance>,
    /// Hidden rather than removed when empty, so measuring never races a remount
    pub visible: bool,
    /// Right padding the input keeps free for the affordances
    pub reserved_width: u16,
}

impl AffordanceRegion {
    pub fn new(items: Vec<Affordance>, measured_width: u16) -> Self {
        let visible = !items.is_empty();
        Self {
            items,
            visible,
            reserved_width: if visible { measured_width } else { 0 },
        }
    }

    pub fn indicator(&self) -> Option<&Indicator> {
        self.items.iter().find_map(|item| match item {
            Affordance::Indicator(indicator) => Some(indicator),
            Affordance::Action(_) => None,
        })
    }
}

/// Everything the toolkit needs to draw a control for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub mode: Mode,
    pub widget: Widget,
    /// Masked single-line styling applies to the container
    pub masked_container: bool,
    pub read_only: bool,
    pub disabled: bool,
    pub auto_focus: bool,
    pub padding_right: u16,
    pub affordances: AffordanceRegion,
}
