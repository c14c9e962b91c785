//! Script console: a script buffer, an output pane and a run button.
//!
//! A click shows [`RUNNING_TEXT`] right away, sends the buffer to the
//! `run_starlark` command and then shows either the resolved value or
//! `Error: <message>`. Clicks are neither deduplicated nor queued. Each click
//! takes a sequence number and only the newest click may write its result, so
//! the pane always reflects the most recent invocation.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::task::JoinHandle;

use crate::bridge::{CommandBridge, ARG_SCRIPT, CMD_RUN_STARLARK};

pub const RUNNING_TEXT: &str = "Running...";
pub const ERROR_PREFIX: &str = "Error: ";

/// Render a resolved command value as display text.
///
/// Strings are shown verbatim, everything else in its compact JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Snapshot taken synchronously when the run button is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRun {
    pub seq: u64,
    pub script: String,
}

/// Result of one click once the backend settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub seq: u64,
    pub text: String,
    pub failed: bool,
    /// False when a newer click started before this one settled.
    pub applied: bool,
}

pub struct ScriptConsole {
    bridge: Arc<dyn CommandBridge>,
    script: RwLock<String>,
    output: RwLock<String>,
    seq: AtomicU64,
}

impl ScriptConsole {
    pub fn new(bridge: Arc<dyn CommandBridge>) -> Self {
        Self {
            bridge,
            script: RwLock::new(String::new()),
            output: RwLock::new(String::new()),
            seq: AtomicU64::new(0),
        }
    }

    pub fn set_script(&self, text: impl Into<String>) {
        *self.script.write() = text.into();
    }

    pub fn script(&self) -> String {
        self.script.read().clone()
    }

    pub fn output(&self) -> String {
        self.output.read().clone()
    }

    /// Synchronous half of a click: mark the pane busy and snapshot the buffer.
    pub fn begin_run(&self) -> PendingRun {
        let script = self.script();
        let mut out = self.output.write();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *out = RUNNING_TEXT.to_string();
        PendingRun { seq, script }
    }

    /// Asynchronous half of a click: invoke the backend and render the result.
    pub async fn complete(&self, run: PendingRun) -> RunOutcome {
        let mut args = Map::new();
        args.insert(ARG_SCRIPT.to_string(), Value::String(run.script));
        let (text, failed) = match self.bridge.invoke(CMD_RUN_STARLARK, Value::Object(args)).await
        {
            Ok(value) => (display_value(&value), false),
            Err(err) => (format!("{ERROR_PREFIX}{err}"), true),
        };

        let applied = {
            let mut out = self.output.write();
            if self.seq.load(Ordering::SeqCst) == run.seq {
                *out = text.clone();
                true
            } else {
                false
            }
        };
        if !applied {
            tracing::debug!(target: "anvil", seq = run.seq, "stale console result dropped");
        }

        RunOutcome {
            seq: run.seq,
            text,
            failed,
            applied,
        }
    }

    /// Handle a click. The pane already shows [`RUNNING_TEXT`] when this returns.
    pub fn run_clicked(&self) -> impl Future<Output = RunOutcome> + Send + '_ {
        let pending = self.begin_run();
        async move { self.complete(pending).await }
    }

    /// Handle a click on the tokio runtime without awaiting the result.
    pub fn spawn_run(self: &Arc<Self>) -> JoinHandle<RunOutcome> {
        let pending = self.begin_run();
        let console = Arc::clone(self);
        tokio::spawn(async move { console.complete(pending).await })
    }
}
