//! The `UniversalInput` control.

use super::widget::{Affordance, AffordanceRegion, RenderPlan, Widget};
use crate::config::{ControlConfig, Hooks, SelectOption};
use crate::mask::{self, MaskSpec};
use crate::mode::{classify, Mode};
use crate::overlay::{should_show_indicator, Indicator};
use crate::sync::{adapter_for, Emission, SyncEngine, DEBOUNCE_WINDOW};
use crate::value::Value;
use std::time::{Duration, Instant};

/// Events the toolkit and host feed into a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Text box, spinner or editor content changed
    Edit(Value),
    /// An option was picked in the selector
    Select(Value),
    /// Focus left the control
    Blur,
    /// The host value changed while mounted
    External(Value),
    /// The host's pending-operation flag changed
    Busy(bool),
    /// The affordance list was attached or updated and measured this wide
    AffordancesMeasured(u16),
}

/// A key press as reported by the toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
        }
    }

    pub fn shifted(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: true,
        }
    }
}

/// What the toolkit should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Pass the key on to the host's own key handler
    pub forward_to_host: bool,
    /// Suppress the toolkit's default action (focus traversal for Tab)
    pub prevent_default: bool,
    /// Text to insert at the caret; the toolkit reports the result as an `Edit`
    pub insert: Option<&'static str>,
}

/// One mounted form-input control.
pub struct UniversalInput {
    config: ControlConfig,
    hooks: Hooks,
    mode: Mode,
    mask: Option<MaskSpec>,
    engine: SyncEngine,
    affordance_width: u16,
}

impl UniversalInput {
    /// Mount a control with the standard debounce window.
    pub fn new(config: ControlConfig, hooks: Hooks) -> Self {
        Self::with_window(config, hooks, DEBOUNCE_WINDOW)
    }

    /// Mount a control with a custom debounce window (useful for tests).
    pub fn with_window(config: ControlConfig, hooks: Hooks, window: Duration) -> Self {
        let (mode, mask) = resolve_mode(&config);
        let adapter = adapter_for(mode, mask.clone(), hooks.prepare_number.clone());
        let mut engine = SyncEngine::with_window(adapter, config.value.clone(), window);
        engine.set_locked(is_locked(&config, mode));

        log::debug!("mounted {} control", mode.name());

        Self {
            config,
            hooks,
            mode,
            mask,
            engine,
            affordance_width: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Compiled mask, present only in masked mode.
    pub fn mask(&self) -> Option<&MaskSpec> {
        self.mask.as_ref()
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn current_draft(&self) -> &Value {
        self.engine.current_draft()
    }

    /// When the next debounced `Change` is due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.engine.deadline()
    }

    /// Route one event. Returns the emissions it produced synchronously.
    pub fn handle(&mut self, event: ControlEvent, now: Instant) -> Vec<Emission> {
        match event {
            ControlEvent::Edit(raw) | ControlEvent::Select(raw) => {
                self.engine.on_live_edit(raw, now)
            }
            ControlEvent::Blur => self.engine.on_blur(),
            ControlEvent::External(value) => {
                self.config.value = value.clone();
                self.engine.on_external_value_change(value);
                Vec::new()
            }
            ControlEvent::Busy(busy) => {
                self.config.in_process = busy;
                Vec::new()
            }
            ControlEvent::AffordancesMeasured(width) => {
                self.affordance_width = width;
                Vec::new()
            }
        }
    }

    /// Deliver the debounced `Change` once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<Emission> {
        self.engine.poll(now).into_iter().collect()
    }

    /// Apply the configuration of a new render cycle.
    ///
    /// Mode hints are re-read; a changed host value counts as an external change.
    pub fn update_config(&mut self, config: ControlConfig) {
        let (mode, mask) = resolve_mode(&config);
        if mode != self.mode || mask != self.mask {
            log::debug!("reclassified {} -> {}", self.mode.name(), mode.name());
            self.engine.set_adapter(adapter_for(
                mode,
                mask.clone(),
                self.hooks.prepare_number.clone(),
            ));
            self.mode = mode;
            self.mask = mask;
        }

        self.engine.set_locked(is_locked(&config, mode));
        if config.value != self.config.value {
            self.engine.on_external_value_change(config.value.clone());
        }
        self.config = config;
    }

    /// Decide what a key press does.
    pub fn key_down(&self, key: &KeyPress) -> KeyOutcome {
        let insert_tab = self.config.allow_tabs && key.key == "Tab" && !key.shift;
        KeyOutcome {
            forward_to_host: true,
            prevent_default: insert_tab,
            insert: insert_tab.then_some("\t"),
        }
    }

    /// Options whose label contains `query`, ignoring case.
    pub fn filter_options(&self, query: &str) -> Vec<&SelectOption> {
        let needle = query.to_lowercase();
        self.config
            .flat_options()
            .into_iter()
            .filter(|option| option.label().to_lowercase().contains(&needle))
            .collect()
    }

    /// Process indicator state; the dirty flag only counts for eventable controls.
    pub fn indicator(&self) -> Indicator {
        should_show_indicator(
            self.config.eventable && self.engine.is_dirty(),
            self.config.in_process,
        )
    }

    /// Describe what the toolkit should draw for this render cycle.
    pub fn render(&self) -> RenderPlan {
        let mut items: Vec<Affordance> = self
            .config
            .actions
            .iter()
            .cloned()
            .map(Affordance::Action)
            .collect();
        let indicator = self.indicator();
        if indicator.show {
            items.push(Affordance::Indicator(indicator));
        }
        let affordances = AffordanceRegion::new(items, self.affordance_width);

        RenderPlan {
            mode: self.mode,
            widget: self.widget(),
            masked_container: self.mode == Mode::Masked && !self.config.multiline,
            read_only: self.config.read_only,
            disabled: self.config.disabled,
            auto_focus: self.config.auto_focus,
            padding_right: affordances.reserved_width,
            affordances,
        }
    }

    fn widget(&self) -> Widget {
        let draft = self.engine.current_draft();
        let text = draft.display_value();

        match self.mode {
            Mode::Numeric if self.mode.renders_static_label(&self.config) => {
                let shown = &self.engine.values().committed;
                let shown = if shown.is_truthy() || shown.is_zero() {
                    shown.clone()
                } else {
                    Value::text("")
                };
                let text = self
                    .hooks
                    .formatter
                    .as_ref()
                    .map(|format| format(&shown))
                    .unwrap_or_default();
                Widget::StaticLabel { text }
            }
            Mode::Numeric => Widget::NumberSpinner {
                value: draft.clone(),
            },
            Mode::Masked => match &self.mask {
                Some(spec) => Widget::MaskedText {
                    complete: spec.is_complete(&text),
                    value: text,
                    mask: spec.pattern().to_string(),
                    placeholder: spec.placeholder().to_string(),
                },
                None => self.text_box(text),
            },
            Mode::EmbeddedEditor => Widget::CodeEditor {
                value: text,
                rows: self.config.rows,
            },
            Mode::Selector => {
                let in_options = self
                    .config
                    .flat_options()
                    .iter()
                    .any(|option| &option.value == draft);
                Widget::Select {
                    value: draft.clone(),
                    options: self.config.options.clone(),
                    invalid_value: !in_options && draft.is_truthy(),
                    searchable: true,
                }
            }
            Mode::Multiline => Widget::TextArea {
                value: text,
                min_rows: if self.config.read_only {
                    1
                } else {
                    self.config.min_rows
                },
                max_rows: self.config.max_rows,
            },
            Mode::Passive => Widget::Passive,
            Mode::Plain => self.text_box(text),
        }
    }

    fn text_box(&self, value: String) -> Widget {
        Widget::TextBox {
            value,
            placeholder: self.config.placeholder.clone(),
        }
    }
}

impl std::fmt::Debug for UniversalInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniversalInput")
            .field("mode", &self.mode)
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

fn resolve_mode(config: &ControlConfig) -> (Mode, Option<MaskSpec>) {
    let mode = classify(config);
    let mask = match (mode, config.mask.as_deref()) {
        (Mode::Masked, Some(pattern)) => mask::compile(pattern),
        (_, Some(pattern)) if !pattern.is_empty() => {
            if let Err(reason) = mask::validate(pattern) {
                log::warn!("ignoring mask {pattern:?}: {reason}");
            }
            None
        }
        _ => None,
    };
    (mode, mask)
}

fn is_locked(config: &ControlConfig, mode: Mode) -> bool {
    config.is_locked() || !mode.is_interactive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectEntry;
    use crate::overlay::IndicatorStyle;

    fn mount(config: ControlConfig) -> UniversalInput {
        UniversalInput::new(config, Hooks::default())
    }

    #[test]
    fn plain_text_box_shows_draft() {
        let mut control = mount(ControlConfig::text());
        control.handle(ControlEvent::Edit(Value::text("abc")), Instant::now());

        let plan = control.render();
        assert_eq!(plan.mode, Mode::Plain);
        assert_eq!(
            plan.widget,
            Widget::TextBox {
                value: "abc".into(),
                placeholder: None
            }
        );
        assert!(!plan.affordances.visible);
        assert_eq!(plan.padding_right, 0);
    }

    #[test]
    fn masked_widget_carries_placeholder() {
        let control = mount(ControlConfig::masked("111-111"));
        match control.render().widget {
            Widget::MaskedText {
                value,
                mask,
                placeholder,
                complete,
            } => {
                assert_eq!(value, "");
                assert_eq!(mask, "111-111");
                assert_eq!(placeholder, "___-___");
                assert!(!complete);
            }
            other => panic!("unexpected widget {other:?}"),
        }
        assert!(control.render().masked_container);
    }

    #[test]
    fn masked_widget_reports_completion() {
        let mut control = mount(ControlConfig::masked("111-111"));
        let t0 = Instant::now();

        control.handle(ControlEvent::Edit(Value::text("123")), t0);
        assert!(matches!(
            control.render().widget,
            Widget::MaskedText { complete: false, .. }
        ));

        control.handle(ControlEvent::Edit(Value::text("123456")), t0);
        assert!(matches!(
            control.render().widget,
            Widget::MaskedText { complete: true, .. }
        ));
    }

    #[test]
    fn invalid_mask_is_dropped_at_mount() {
        let control = mount(ControlConfig::masked(r"111\"));
        assert_eq!(control.mode(), Mode::Plain);
        assert!(control.mask().is_none());

        let mut config = ControlConfig::number();
        config.mask = Some("111-111".into());
        let control = mount(config);
        assert_eq!(control.mode(), Mode::Numeric);
        assert!(control.mask().is_none());
    }

    #[test]
    fn read_only_number_uses_formatter() {
        let hooks = Hooks::new().with_formatter(|v| format!("${v}"));
        let control = UniversalInput::new(
            ControlConfig::number().read_only().with_value(0_i64),
            hooks,
        );
        assert_eq!(
            control.render().widget,
            Widget::StaticLabel { text: "$0".into() }
        );
    }

    #[test]
    fn read_only_number_without_formatter_is_blank() {
        let control = mount(ControlConfig::number().read_only().with_value(5_i64));
        assert_eq!(
            control.render().widget,
            Widget::StaticLabel {
                text: String::new()
            }
        );
    }

    #[test]
    fn selector_flags_unknown_value() {
        let control = mount(
            ControlConfig::select([SelectOption::new("a"), SelectOption::new("b")])
                .with_value("z"),
        );
        match control.render().widget {
            Widget::Select { invalid_value, .. } => assert!(invalid_value),
            other => panic!("unexpected widget {other:?}"),
        }

        let control = mount(ControlConfig::select([SelectOption::new("a")]));
        match control.render().widget {
            Widget::Select { invalid_value, .. } => assert!(!invalid_value),
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn filter_matches_labels_in_groups() {
        let control = mount(ControlConfig::select(vec![
            SelectEntry::from(SelectOption::labeled("fr", "France")),
            SelectEntry::Group {
                value: Value::text("eu"),
                label: "Europe".into(),
                options: vec![
                    SelectOption::labeled("fi", "Finland"),
                    SelectOption::labeled("de", "Germany"),
                ],
            },
        ]));

        let found: Vec<_> = control
            .filter_options("FIN")
            .into_iter()
            .map(|o| o.label())
            .collect();
        assert_eq!(found, vec!["Finland".to_string()]);
        assert_eq!(control.filter_options("an").len(), 3);
    }

    #[test]
    fn tab_inserts_only_when_allowed() {
        let mut config = ControlConfig::multiline();
        let plain = mount(config.clone());
        assert_eq!(plain.key_down(&KeyPress::new("Tab")).insert, None);

        config.allow_tabs = true;
        let control = mount(config);
        let outcome = control.key_down(&KeyPress::new("Tab"));
        assert!(outcome.prevent_default);
        assert_eq!(outcome.insert, Some("\t"));
        assert!(outcome.forward_to_host);
        assert!(!control.key_down(&KeyPress::shifted("Tab")).prevent_default);
    }

    #[test]
    fn indicator_joins_actions_and_reserves_width() {
        let mut control = mount(ControlConfig::text().eventable().with_actions(["clear"]));
        let t0 = Instant::now();
        control.handle(ControlEvent::AffordancesMeasured(40), t0);
        control.handle(ControlEvent::Edit(Value::text("x")), t0);

        let plan = control.render();
        assert!(plan.affordances.visible);
        assert_eq!(plan.padding_right, 40);
        assert_eq!(plan.affordances.items.len(), 2);
        assert_eq!(
            plan.affordances.indicator().map(|i| i.style),
            Some(IndicatorStyle::Active)
        );

        control.handle(ControlEvent::Busy(true), t0);
        assert_eq!(control.indicator().style, IndicatorStyle::Busy);

        control.handle(ControlEvent::Busy(false), t0);
        control.handle(ControlEvent::Blur, t0);
        assert!(!control.indicator().show);
        assert_eq!(control.render().affordances.items.len(), 1);
    }

    #[test]
    fn dirty_is_ignored_unless_eventable() {
        let mut control = mount(ControlConfig::text());
        control.handle(ControlEvent::Edit(Value::text("x")), Instant::now());
        assert!(control.engine().is_dirty());
        assert!(!control.indicator().show);
    }

    #[test]
    fn passive_mode_never_edits() {
        let mut config = ControlConfig::text();
        config.has_children = true;
        let mut control = mount(config);

        assert_eq!(control.render().widget, Widget::Passive);
        assert!(control
            .handle(ControlEvent::Edit(Value::text("x")), Instant::now())
            .is_empty());
        assert!(control.handle(ControlEvent::Blur, Instant::now()).is_empty());
    }

    #[test]
    fn reconfiguring_reclassifies_and_resets_value() {
        let mut control = mount(ControlConfig::text());
        control.handle(ControlEvent::Edit(Value::text("draft")), Instant::now());

        control.update_config(ControlConfig::number().with_value(3_i64));
        assert_eq!(control.mode(), Mode::Numeric);
        assert_eq!(control.current_draft(), &Value::Number(3.0));

        control.handle(ControlEvent::Edit(Value::text("0")), Instant::now());
        assert_eq!(control.current_draft(), &Value::Number(0.0));
    }

    #[test]
    fn text_area_rows_collapse_when_read_only() {
        let mut config = ControlConfig::multiline().read_only();
        config.min_rows = 3;
        match mount(config).render().widget {
            Widget::TextArea {
                min_rows, max_rows, ..
            } => {
                assert_eq!(min_rows, 1);
                assert_eq!(max_rows, 20);
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }
}
