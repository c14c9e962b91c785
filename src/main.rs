use std::process::ExitCode;

use black_anvil::cli::{self, Cli};
use black_anvil::init_tracing;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    match cli::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(target: "anvil", "black-anvil: {err:?}");
            ExitCode::FAILURE
        }
    }
}
