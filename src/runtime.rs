//! Async driver for a single control.
//!
//! The control itself is a synchronous state machine with injected time. Hosts that live
//! on tokio can hand it to [`control_worker_loop`], which feeds it commands from a channel,
//! sleeps until the debounce deadline, applies values published on the change hub, and
//! forwards every emission on an output channel.

use crate::surface::{ControlEvent, RenderPlan, UniversalInput};
use crate::sync::Emission;
use crate::value::Value;
use std::time::Instant;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// Commands accepted by the control worker.
#[derive(Debug)]
pub enum ControlCommand {
    Event(ControlEvent),
    /// Reply with the current render plan
    Render(oneshot::Sender<RenderPlan>),
    Shutdown,
}

/// Run a control until `Shutdown` or until the command channel closes.
pub async fn control_worker_loop(
    mut rx: Receiver<ControlCommand>,
    tx: Sender<Emission>,
    mut control: UniversalInput,
    mut external: Option<watch::Receiver<Value>>,
) {
    loop {
        let deadline = control.deadline();

        let emissions = tokio::select! {
            cmd = rx.recv() => match cmd {
                Some(ControlCommand::Event(event)) => control.handle(event, now()),
                Some(ControlCommand::Render(reply)) => {
                    let _ = reply.send(control.render());
                    Vec::new()
                }
                Some(ControlCommand::Shutdown) | None => break,
            },
            _ = sleep_until_deadline(deadline) => control.tick(now()),
            update = next_external(&mut external) => match update {
                Some(value) => control.handle(ControlEvent::External(value), now()),
                None => {
                    log::debug!("runtime: change hub closed");
                    external = None;
                    Vec::new()
                }
            },
        };

        for emission in emissions {
            if tx.send(emission).await.is_err() {
                return;
            }
        }
    }
}

/// Handle to a spawned control worker.
#[derive(Debug)]
pub struct ControlHandle {
    pub commands: Sender<ControlCommand>,
    pub emissions: Receiver<Emission>,
    pub worker: JoinHandle<()>,
}

impl ControlHandle {
    /// Ask the worker for its current render plan.
    pub async fn render(&self) -> Option<RenderPlan> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(ControlCommand::Render(reply))
            .await
            .ok()?;
        response.await.ok()
    }
}

/// Spawn a control worker on the current tokio runtime.
pub fn spawn_control(
    control: UniversalInput,
    external: Option<watch::Receiver<Value>>,
) -> ControlHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (emit_tx, emit_rx) = mpsc::channel(32);
    let worker = tokio::spawn(control_worker_loop(cmd_rx, emit_tx, control, external));

    ControlHandle {
        commands: cmd_tx,
        emissions: emit_rx,
        worker,
    }
}

/// Current time on the tokio clock, so paused test clocks drive the debouncer too.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn next_external(external: &mut Option<watch::Receiver<Value>>) -> Option<Value> {
    match external {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}
