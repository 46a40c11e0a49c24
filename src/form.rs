//! A host for a set of named controls.
//!
//! [`Form`] plays the part of the application around the controls: it keeps one value
//! per key, stores every `Change` it receives, feeds the stored value back to the control
//! as its new host value, and shares values with other sessions through a [`ChangeHub`].
//! Time is virtual: [`Step::Wait`] advances the clock and fires debounced changes at
//! their exact deadlines, so a replayed script always produces the same output.

use crate::config::{ControlConfig, Hooks};
use crate::error::{Result, UniversalInputError};
use crate::hub::ChangeHub;
use crate::mode::Mode;
use crate::script::Step;
use crate::surface::{ControlEvent, KeyOutcome, KeyPress, UniversalInput};
use crate::sync::Emission;
use crate::value::{parse_number, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Something observable that happened while applying a step.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEventKind {
    /// The control emitted a notification
    Emitted(Emission),
    /// The control decided what a key press does
    Key(KeyOutcome),
    /// Another session changed the stored value
    External(Value),
}

/// A [`FormEventKind`] stamped with the field and the virtual time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormEvent {
    pub at: Duration,
    pub key: String,
    pub kind: FormEventKind,
}

impl fmt::Display for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}ms] {}: ", self.at.as_millis(), self.key)?;
        match &self.kind {
            FormEventKind::Emitted(Emission::Change(v)) => write!(f, "change {}", describe(v)),
            FormEventKind::Emitted(Emission::EndEditing(v)) => {
                write!(f, "end-editing {}", describe(v))
            }
            FormEventKind::Key(outcome) => match outcome.insert {
                Some(text) => write!(f, "key inserts {text:?}"),
                None => write!(f, "key passed through"),
            },
            FormEventKind::External(v) => write!(f, "external {}", describe(v)),
        }
    }
}

/// Human-readable rendering of a value for logs and output.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Empty => "<empty>".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Text(s) => format!("{s:?}"),
    }
}

struct Field {
    key: String,
    control: UniversalInput,
    updates: watch::Receiver<Value>,
}

/// Ordered named controls wired to a change hub.
pub struct Form {
    fields: Vec<Field>,
    values: HashMap<String, Value>,
    hub: Arc<ChangeHub>,
    origin: Instant,
    elapsed: Duration,
}

impl Form {
    pub fn new(hub: Arc<ChangeHub>) -> Self {
        Self {
            fields: Vec::new(),
            values: HashMap::new(),
            hub,
            origin: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Build a form from a definition; every field shares `hooks`.
    #[cfg(feature = "config")]
    pub fn from_config(
        config: &crate::config::form::FormConfig,
        hooks: Hooks,
        hub: Arc<ChangeHub>,
    ) -> Result<Self> {
        let mut form = Self::new(hub);
        for field in &config.fields {
            form.add_field(&field.key, field.control.clone(), hooks.clone())?;
        }
        Ok(form)
    }

    /// Mount a control under `key`. The initial host value comes from the config.
    pub fn add_field(&mut self, key: &str, config: ControlConfig, hooks: Hooks) -> Result<()> {
        if self.index(key).is_some() {
            return Err(UniversalInputError::config(format!(
                "Duplicate field key: {key}"
            )));
        }

        self.values.insert(key.to_string(), config.value.clone());
        let updates = self.hub.subscribe(key);
        let control = UniversalInput::new(config, hooks);
        log::debug!("form: field {key} mounted as {}", control.mode().name());

        self.fields.push(Field {
            key: key.to_string(),
            control,
            updates,
        });
        Ok(())
    }

    pub fn hub(&self) -> &Arc<ChangeHub> {
        &self.hub
    }

    /// Virtual time since the form was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn control(&self, key: &str) -> Option<&UniversalInput> {
        self.index(key).map(|idx| &self.fields[idx].control)
    }

    /// Stored host value of `key`.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Stored values in field order.
    pub fn values(&self) -> Vec<(&str, &Value)> {
        self.fields
            .iter()
            .filter_map(|field| {
                self.values
                    .get(&field.key)
                    .map(|value| (field.key.as_str(), value))
            })
            .collect()
    }

    /// Apply every step in order.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<FormEvent>> {
        let mut events = Vec::new();
        for step in steps {
            events.extend(self.apply(step)?);
        }
        Ok(events)
    }

    /// Apply one step at the current virtual time.
    pub fn apply(&mut self, step: &Step) -> Result<Vec<FormEvent>> {
        let mut events = Vec::new();

        match step {
            Step::Wait(duration) => {
                self.advance(*duration, &mut events);
                return Ok(events);
            }
            Step::Push { key, value } => {
                let idx = self.require(key)?;
                let value = match value {
                    Some(text) => coerce(self.fields[idx].control.mode(), text),
                    None => Value::Empty,
                };
                log::debug!("form: push {key} = {}", describe(&value));
                self.hub.publish(key, value);
            }
            Step::Edit { key, text } => {
                let idx = self.require(key)?;
                self.dispatch(idx, ControlEvent::Edit(Value::text(text.as_str())), &mut events);
            }
            Step::Select { key, value } => {
                let idx = self.require(key)?;
                let value = self.option_value(idx, value);
                self.dispatch(idx, ControlEvent::Select(value), &mut events);
            }
            Step::Blur { key } => {
                let idx = self.require(key)?;
                self.dispatch(idx, ControlEvent::Blur, &mut events);
            }
            Step::Key { key, name, shift } => {
                let idx = self.require(key)?;
                let press = KeyPress {
                    key: name.clone(),
                    shift: *shift,
                };
                let outcome = self.fields[idx].control.key_down(&press);
                events.push(self.event(idx, FormEventKind::Key(outcome)));

                if let Some(text) = outcome.insert {
                    let mut edited = self.fields[idx].control.current_draft().display_value();
                    edited.push_str(text);
                    self.dispatch(idx, ControlEvent::Edit(Value::Text(edited)), &mut events);
                }
            }
            Step::Busy { key, busy } => {
                let idx = self.require(key)?;
                self.dispatch(idx, ControlEvent::Busy(*busy), &mut events);
            }
            Step::Measure { key, width } => {
                let idx = self.require(key)?;
                self.dispatch(idx, ControlEvent::AffordancesMeasured(*width), &mut events);
            }
        }

        self.drain_hub(&mut events);
        Ok(events)
    }

    /// Advance past every pending debounce deadline.
    pub fn settle(&mut self) -> Vec<FormEvent> {
        let mut events = Vec::new();
        let last = self
            .fields
            .iter()
            .filter_map(|field| field.control.deadline())
            .max();
        if let Some(deadline) = last {
            let target = deadline.saturating_duration_since(self.origin);
            self.advance(target.saturating_sub(self.elapsed), &mut events);
        }
        events
    }

    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn index(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key == key)
    }

    fn require(&self, key: &str) -> Result<usize> {
        self.index(key)
            .ok_or_else(|| UniversalInputError::unknown_field(key))
    }

    fn event(&self, idx: usize, kind: FormEventKind) -> FormEvent {
        FormEvent {
            at: self.elapsed,
            key: self.fields[idx].key.clone(),
            kind,
        }
    }

    /// Fire due deadlines in chronological order, then land on the target time.
    fn advance(&mut self, by: Duration, events: &mut Vec<FormEvent>) {
        let target = self.elapsed + by;
        let until = self.origin + target;

        loop {
            let due = self
                .fields
                .iter()
                .enumerate()
                .filter_map(|(idx, field)| field.control.deadline().map(|d| (d, idx)))
                .filter(|(deadline, _)| *deadline <= until)
                .min();
            let Some((deadline, idx)) = due else {
                break;
            };

            self.elapsed = deadline.saturating_duration_since(self.origin);
            let emissions = self.fields[idx].control.tick(deadline);
            self.deliver(idx, emissions, events);
            self.drain_hub(events);
        }

        self.elapsed = target;
    }

    fn dispatch(&mut self, idx: usize, event: ControlEvent, events: &mut Vec<FormEvent>) {
        let now = self.now();
        let emissions = self.fields[idx].control.handle(event, now);
        self.deliver(idx, emissions, events);
    }

    /// Act as the host: store each `Change`, share it, and re-render with it.
    fn deliver(&mut self, idx: usize, emissions: Vec<Emission>, events: &mut Vec<FormEvent>) {
        for emission in emissions {
            if let Emission::Change(value) = &emission {
                let key = self.fields[idx].key.clone();
                self.values.insert(key.clone(), value.clone());
                self.hub.publish(&key, value.clone());
                let now = self.now();
                self.fields[idx]
                    .control
                    .handle(ControlEvent::External(value.clone()), now);
            }
            events.push(self.event(idx, FormEventKind::Emitted(emission)));
        }
    }

    /// Apply values other sessions published since the last step.
    fn drain_hub(&mut self, events: &mut Vec<FormEvent>) {
        for idx in 0..self.fields.len() {
            let field = &mut self.fields[idx];
            if !matches!(field.updates.has_changed(), Ok(true)) {
                continue;
            }
            let value = field.updates.borrow_and_update().clone();
            if self.values.get(&field.key) == Some(&value) {
                continue;
            }

            self.values.insert(field.key.clone(), value.clone());
            let now = self.origin + self.elapsed;
            self.fields[idx]
                .control
                .handle(ControlEvent::External(value.clone()), now);
            events.push(self.event(idx, FormEventKind::External(value)));
        }
    }

    /// Map a scripted selection to an option value, matching values before labels.
    fn option_value(&self, idx: usize, text: &str) -> Value {
        let options = self.fields[idx].control.config().flat_options();
        options
            .iter()
            .find(|option| option.value.to_string() == text)
            .or_else(|| options.iter().find(|option| option.label() == text))
            .map(|option| option.value.clone())
            .unwrap_or_else(|| Value::text(text))
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields.iter().map(|x| &x.key).collect::<Vec<_>>())
            .field("values", &self.values)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

/// Values pushed to numeric fields arrive as numbers when they parse.
fn coerce(mode: Mode, text: &str) -> Value {
    match (mode, parse_number(text)) {
        (Mode::Numeric, Some(n)) => Value::Number(n),
        _ => Value::text(text),
    }
}
