pub mod bridge;
pub mod cli;
pub mod config;
pub mod console;
pub mod core;
pub mod install;
pub mod starlark_host;

#[cfg(feature = "desktop")]
pub mod commands;

pub use bridge::{CommandBridge, InvokeError, LocalBridge, ARG_SCRIPT, CMD_RUN_STARLARK};
pub use config::{InstallConfig, ScriptLimits};
pub use console::{display_value, RunOutcome, ScriptConsole, ERROR_PREFIX, RUNNING_TEXT};
pub use crate::core::{init_tracing, APP_NAME};
pub use install::{
    build_project, copy_binary, install, vendor_dependencies, BuildType, InstallReport,
    InstallRequest,
};
pub use starlark_host::{run_starlark, ScriptError, ScriptHost};
