//! Backend command invocation.
//!
//! Front ends talk to the host through named commands that take a key-value
//! argument object and resolve to a JSON value or reject with an error
//! message. `LocalBridge` serves those commands in-process; the desktop shell
//! serves the same names over Tauri IPC.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::errors as config_errors;
use crate::starlark_host::ScriptHost;

// WHY: Centralize command and argument names so the console and both hosts agree.
pub const CMD_RUN_STARLARK: &str = "run_starlark";
pub const ARG_SCRIPT: &str = "script";

/// Rejection value of a backend command. Displays as its message only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvokeError {
    pub message: String,
}

impl InvokeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InvokeError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Anything that can execute a backend command by name.
#[async_trait]
pub trait CommandBridge: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, InvokeError>;
}

#[derive(Debug, Deserialize)]
struct RunStarlarkArgs {
    script: String,
}

/// In-process command host backed by a [`ScriptHost`].
#[derive(Debug, Clone, Default)]
pub struct LocalBridge {
    host: ScriptHost,
}

impl LocalBridge {
    pub fn new(host: ScriptHost) -> Self {
        Self { host }
    }

    async fn run_starlark(&self, args: Value) -> Result<Value, InvokeError> {
        let args: RunStarlarkArgs = serde_json::from_value(args).map_err(|e| {
            InvokeError::new(format!(
                "{}: invalid args for {}: {}",
                config_errors::ERR_INVALID_ARGS,
                CMD_RUN_STARLARK,
                e
            ))
        })?;
        self.host
            .run(args.script)
            .await
            .map(Value::String)
            .map_err(|e| InvokeError::new(e.to_string()))
    }
}

#[async_trait]
impl CommandBridge for LocalBridge {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, InvokeError> {
        tracing::debug!(target: "anvil", command, "dispatching command");
        match command {
            CMD_RUN_STARLARK => self.run_starlark(args).await,
            other => Err(InvokeError::new(format!(
                "{}: unknown command '{}'",
                config_errors::ERR_UNKNOWN_COMMAND,
                other
            ))),
        }
    }
}
