//! Starlark script host.
//!
//! Scripts are parsed with the extended dialect and evaluated against the
//! standard globals plus `print` and `json`. The result of a run is the
//! display form of the module's final expression, mirroring what a REPL
//! would echo. `load()` is not wired to any loader and fails at evaluation.

use std::time::{Duration, Instant};

use starlark::environment::{GlobalsBuilder, LibraryExtension, Module};
use starlark::eval::Evaluator;
use starlark::syntax::{AstModule, Dialect};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::config::errors as config_errors;
use crate::config::ScriptLimits;

/// File name reported in diagnostics for inline scripts.
pub const SCRIPT_FILE_NAME: &str = "script.star";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("E-ANVIL-0601: script is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("E-ANVIL-0602: {0}")]
    Parse(String),
    #[error("E-ANVIL-0603: {0}")]
    Eval(String),
    #[error("E-ANVIL-0604: evaluation timed out after {0}ms")]
    Timeout(u64),
    #[error("E-ANVIL-0605: evaluator thread failed: {0}")]
    Join(String),
}

impl ScriptError {
    /// Stable error code carried by this variant.
    pub fn code(&self) -> &'static str {
        match self {
            ScriptError::TooLarge { .. } => config_errors::ERR_SCRIPT_TOO_LARGE,
            ScriptError::Parse(_) => config_errors::ERR_SCRIPT_PARSE,
            ScriptError::Eval(_) => config_errors::ERR_SCRIPT_EVAL,
            ScriptError::Timeout(_) => config_errors::ERR_SCRIPT_TIMEOUT,
            ScriptError::Join(_) => config_errors::ERR_SCRIPT_JOIN,
        }
    }
}

/// Evaluate `script` synchronously and return the display form of its value.
pub fn run_starlark(script: &str) -> Result<String, ScriptError> {
    let ast = AstModule::parse(SCRIPT_FILE_NAME, script.to_owned(), &Dialect::Extended)
        .map_err(|e| ScriptError::Parse(e.to_string()))?;
    let globals =
        GlobalsBuilder::extended_by(&[LibraryExtension::Print, LibraryExtension::Json]).build();
    let module = Module::new();
    let rendered = {
        let mut eval = Evaluator::new(&module);
        let value = eval
            .eval_module(ast, &globals)
            .map_err(|e| ScriptError::Eval(e.to_string()))?;
        value.to_str()
    };
    Ok(rendered)
}

/// Runs scripts off the async executor under size and time limits.
#[derive(Debug, Clone, Default)]
pub struct ScriptHost {
    limits: ScriptLimits,
}

impl ScriptHost {
    pub fn new(limits: ScriptLimits) -> Self {
        Self { limits }
    }

    pub fn from_env() -> Self {
        Self::new(ScriptLimits::from_env())
    }

    pub fn limits(&self) -> ScriptLimits {
        self.limits
    }

    /// Evaluate `script` on a dedicated evaluator thread.
    ///
    /// A timeout releases the caller but does not stop the evaluator thread.
    /// The thread is detached, so it never holds up process exit.
    pub async fn run(&self, script: String) -> Result<String, ScriptError> {
        #[cfg(feature = "otel_spans")]
        let _span = tracing::info_span!("run_starlark", script_bytes = script.len());

        let size = script.len();
        if size > self.limits.max_script_bytes {
            tracing::warn!(
                target: "anvil",
                size,
                limit = self.limits.max_script_bytes,
                "script rejected: too large"
            );
            return Err(ScriptError::TooLarge {
                size,
                limit: self.limits.max_script_bytes,
            });
        }

        let started = Instant::now();
        let deadline = Duration::from_millis(self.limits.timeout_ms);
        let (tx, rx) = oneshot::channel();
        // Detached: a runaway script must not keep the runtime alive at shutdown.
        let spawned = std::thread::Builder::new()
            .name("starlark-eval".into())
            .spawn(move || {
                let _ = tx.send(run_starlark(&script));
            });
        let res = match spawned {
            Err(err) => Err(ScriptError::Join(err.to_string())),
            Ok(_) => match timeout(deadline, rx).await {
                Ok(Ok(res)) => res,
                Ok(Err(_)) => Err(ScriptError::Join(
                    "evaluator exited without a result".into(),
                )),
                Err(_) => Err(ScriptError::Timeout(self.limits.timeout_ms)),
            },
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        match &res {
            Ok(out) => tracing::info!(
                target: "anvil",
                duration_ms,
                output_bytes = out.len(),
                "script finished"
            ),
            Err(err) => tracing::warn!(
                target: "anvil",
                duration_ms,
                code = err.code(),
                "script failed"
            ),
        }
        res
    }
}
