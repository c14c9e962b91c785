//! Tauri commands exposed to the webview, and the desktop shell that serves them.
pub mod scripts;

pub use scripts::DesktopState;

/// Build and run the desktop shell until its last window closes.
pub fn run_desktop() -> tauri::Result<()> {
    let state = DesktopState::from_env();
    tracing::info!(
        target: "anvil",
        timeout_ms = state.host.limits().timeout_ms,
        max_script_bytes = state.host.limits().max_script_bytes,
        "desktop shell starting"
    );
    tauri::Builder::default()
        .manage(state)
        .invoke_handler(tauri::generate_handler![scripts::run_starlark])
        .run(tauri::generate_context!())
}
