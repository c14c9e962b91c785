#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::process::ExitCode;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    black_anvil::init_tracing();
    match black_anvil::commands::run_desktop() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(target: "anvil", "error while running desktop shell: {err}");
            ExitCode::FAILURE
        }
    }
}
