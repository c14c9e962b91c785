//! Command-line front end.
//!
//! Install settings resolve in order: command-line flags, the TOML config
//! file, then interactive prompts (or their defaults under `--yes`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Input, Select};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::bridge::LocalBridge;
use crate::config::InstallConfig;
use crate::console::ScriptConsole;
use crate::install::{self, BuildType, InstallRequest};
use crate::starlark_host::ScriptHost;

pub const DEFAULT_PROJECT_PATH: &str = ".";
pub const DEFAULT_INSTALL_DIR: &str = "./install";

#[derive(Debug, Parser)]
#[command(name = "black-anvil", version, about = "Build, install and script Rust projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a Cargo project and copy its binary into an install directory.
    Install(InstallArgs),
    /// Evaluate a Starlark script from FILE (or stdin) through the script console.
    Run {
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// TOML file with project_path, build_type, install_dir and vendor keys
    /// (defaults to install.toml in the user config dir when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub project: Option<String>,
    /// release or debug
    #[arg(long)]
    pub build_type: Option<BuildType>,
    #[arg(long)]
    pub install_dir: Option<String>,
    /// Vendor dependencies next to the installed binary.
    #[arg(long)]
    pub vendor: bool,
    /// Accept defaults instead of prompting.
    #[arg(long, short = 'y')]
    pub yes: bool,
    /// Print the install report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Source of answers for settings missing from flags and config.
pub trait Prompter {
    fn project_path(&self, default: &str) -> Result<String>;
    fn build_type(&self, default: BuildType) -> Result<BuildType>;
    fn install_dir(&self, default: &str) -> Result<String>;
    fn vendor(&self, default: bool) -> Result<bool>;
}

/// Answers every question with its default.
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn project_path(&self, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn build_type(&self, default: BuildType) -> Result<BuildType> {
        Ok(default)
    }

    fn install_dir(&self, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn vendor(&self, default: bool) -> Result<bool> {
        Ok(default)
    }
}

/// Asks on the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn project_path(&self, default: &str) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt("Path to Rust project")
            .default(default.to_string())
            .interact_text()?)
    }

    fn build_type(&self, default: BuildType) -> Result<BuildType> {
        let items: Vec<&str> = BuildType::ALL.iter().map(|b| b.as_str()).collect();
        let start = BuildType::ALL
            .iter()
            .position(|b| *b == default)
            .unwrap_or(0);
        let selection = Select::new()
            .with_prompt("Build type")
            .items(&items[..])
            .default(start)
            .interact()?;
        Ok(BuildType::ALL[selection])
    }

    fn install_dir(&self, default: &str) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt("Installation directory")
            .default(default.to_string())
            .interact_text()?)
    }

    fn vendor(&self, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt("Vendor dependencies?")
            .default(default)
            .interact()?)
    }
}

/// Merge flags, config file and prompts into an [`InstallRequest`].
pub fn resolve_install_request(
    args: &InstallArgs,
    file_cfg: &InstallConfig,
    prompter: &dyn Prompter,
) -> Result<InstallRequest> {
    let project_path = match args.project.clone().or_else(|| file_cfg.project_path.clone()) {
        Some(p) => p,
        None => prompter.project_path(DEFAULT_PROJECT_PATH)?,
    };
    let build_type = match args.build_type.or(file_cfg.build_type) {
        Some(b) => b,
        None => prompter.build_type(BuildType::default())?,
    };
    let install_dir = match args.install_dir.clone().or_else(|| file_cfg.install_dir.clone()) {
        Some(d) => d,
        None => prompter.install_dir(DEFAULT_INSTALL_DIR)?,
    };
    // WHY: a bare boolean flag cannot express "no"; only its presence overrides the file.
    let vendor = if args.vendor {
        true
    } else {
        match file_cfg.vendor {
            Some(v) => v,
            None => prompter.vendor(false)?,
        }
    };
    Ok(InstallRequest {
        project_path: PathBuf::from(project_path),
        build_type,
        install_dir: PathBuf::from(install_dir),
        vendor,
    })
}

pub async fn install_cmd(args: InstallArgs) -> Result<()> {
    let file_cfg = match &args.config {
        Some(path) => InstallConfig::from_file(path)?,
        None => InstallConfig::load_default()?,
    };
    let request = if args.yes {
        resolve_install_request(&args, &file_cfg, &DefaultsPrompter)?
    } else {
        resolve_install_request(&args, &file_cfg, &TerminalPrompter)?
    };
    let report = install::install(&request).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    let file_name = report
        .binary
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("Installed {:?} to {}", file_name, report.binary.display());
    println!("sha256: {}", report.sha256);
    if let Some(crates) = report.vendored_crates {
        println!("vendored crates: {crates}");
    }
    Ok(())
}

async fn read_script<R: AsyncRead + Unpin>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .await
        .context("failed to read script from stdin")?;
    Ok(buf)
}

/// Returns false when the script failed.
pub async fn run_cmd(file: Option<PathBuf>) -> Result<bool> {
    let script = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => read_script(tokio::io::stdin()).await?,
    };
    let console = ScriptConsole::new(Arc::new(LocalBridge::new(ScriptHost::from_env())));
    console.set_script(script);
    let pending = console.run_clicked();
    println!("{}", console.output());
    let outcome = pending.await;
    println!("{}", console.output());
    Ok(!outcome.failed)
}

pub async fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Install(args) => install_cmd(args).await.map(|_| true),
        Command::Run { file } => run_cmd(file).await,
    }
}
