//! Script execution commands.
use tauri::State;

use crate::starlark_host::ScriptHost;

/// Managed state shared by the desktop commands.
#[derive(Debug, Default)]
pub struct DesktopState {
    pub host: ScriptHost,
}

impl DesktopState {
    pub fn from_env() -> Self {
        Self {
            host: ScriptHost::from_env(),
        }
    }
}

/// Evaluate a Starlark script and resolve to its display value.
///
/// The webview calls this as `invoke("run_starlark", { script })`; a rejected
/// promise carries the error message.
#[tauri::command]
pub async fn run_starlark(state: State<'_, DesktopState>, script: String) -> Result<String, String> {
    #[cfg(feature = "otel_spans")]
    let _span = tracing::info_span!("run_starlark_command", script_bytes = script.len());
    run_with_host(&state.host, script).await
}

pub(crate) async fn run_with_host(host: &ScriptHost, script: String) -> Result<String, String> {
    host.run(script).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::errors as config_errors;

    #[tokio::test]
    async fn command_resolves_script_value() {
        let state = DesktopState::default();
        assert_eq!(run_with_host(&state.host, "1+1".into()).await, Ok("2".into()));
    }

    #[tokio::test]
    async fn command_rejects_with_error_string() {
        let state = DesktopState::default();
        let err = run_with_host(&state.host, "1 +".into()).await.unwrap_err();
        assert!(err.starts_with(config_errors::ERR_SCRIPT_PARSE), "{err}");
    }
}
