//! Process-wide change hub.
//!
//! The host owns persisted values; when another session changes one, every control bound
//! to that key has to see it as an external value change. Instead of each render
//! registering its own page-wide listener, the application creates one hub at start-up,
//! shares it, and tears it down on shutdown. Dispatch is per key through `watch`
//! channels, so a slow subscriber only ever sees the latest value.

use crate::value::Value;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::watch;

/// Keyed fan-out of host value changes.
#[derive(Debug, Default)]
pub struct ChangeHub {
    channels: Mutex<HashMap<String, watch::Sender<Value>>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to changes of `key`. The receiver starts with the current value marked
    /// as seen, so only later publications register as changes.
    pub fn subscribe(&self, key: &str) -> watch::Receiver<Value> {
        let mut channels = self.channels.lock();
        channels
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(Value::Empty).0)
            .subscribe()
    }

    /// Publish a new value for `key`. Returns how many subscribers were notified.
    pub fn publish(&self, key: &str, value: Value) -> usize {
        let mut channels = self.channels.lock();
        let sender = channels
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(Value::Empty).0);
        sender.send_replace(value);
        log::debug!("hub: published {key} to {} subscribers", sender.receiver_count());
        sender.receiver_count()
    }

    /// Latest value published for `key`.
    pub fn current(&self, key: &str) -> Option<Value> {
        self.channels
            .lock()
            .get(key)
            .map(|sender| sender.borrow().clone())
    }

    pub fn subscriber_count(&self, key: &str) -> usize {
        self.channels
            .lock()
            .get(key)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Close every channel. Subscribers observe the closure and stop listening.
    pub fn shutdown(&self) {
        let mut channels = self.channels.lock();
        log::debug!("hub: shutting down {} channels", channels.len());
        channels.clear();
    }
}
