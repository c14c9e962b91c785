//! Build-and-install pipeline for Cargo projects.
//!
//! `install` builds a project with cargo, copies the produced binary into an
//! install directory and optionally vendors the project's dependencies next
//! to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::process::Command;

use crate::config::errors as config_errors;

/// Cargo profile to build with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BuildType {
    #[default]
    Release,
    Debug,
}

impl BuildType {
    pub const ALL: [BuildType; 2] = [BuildType::Release, BuildType::Debug];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Release => "release",
            BuildType::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release" => Ok(BuildType::Release),
            "debug" => Ok(BuildType::Debug),
            other => Err(format!(
                "unknown build type '{other}' (expected 'release' or 'debug')"
            )),
        }
    }
}

impl TryFrom<String> for BuildType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Deserialize)]
struct CargoPackage {
    name: String,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: CargoPackage,
}

/// Read `package.name` from `<project>/Cargo.toml`.
pub fn package_name(project_path: &Path) -> Result<String> {
    let manifest_path = project_path.join("Cargo.toml");
    let raw = std::fs::read_to_string(&manifest_path).with_context(|| {
        format!(
            "{}: failed to read {}",
            config_errors::ERR_MANIFEST,
            manifest_path.display()
        )
    })?;
    let manifest: CargoManifest = toml::from_str(&raw).with_context(|| {
        format!(
            "{}: failed to parse {}",
            config_errors::ERR_MANIFEST,
            manifest_path.display()
        )
    })?;
    Ok(manifest.package.name)
}

/// Platform file name of a binary target.
pub fn binary_file_name(package: &str) -> String {
    if cfg!(windows) {
        format!("{package}.exe")
    } else {
        package.to_string()
    }
}

fn cargo_program() -> String {
    std::env::var("CARGO").unwrap_or_else(|_| "cargo".into())
}

async fn run_cargo(project_path: &Path, args: &[String]) -> Result<Output> {
    let program = cargo_program();
    Command::new(&program)
        .args(args)
        .current_dir(project_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| {
            format!(
                "{}: failed to run {} {}",
                config_errors::ERR_SPAWN,
                program,
                args.join(" ")
            )
        })
}

fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(20);
    lines[start..].join("\n")
}

/// Run `cargo build` for the project.
///
/// The target dir is pinned to `<project>/target` so [`copy_binary`] finds
/// the artifact regardless of `CARGO_TARGET_DIR`.
pub async fn build_project(project_path: &Path, build_type: BuildType) -> Result<()> {
    #[cfg(feature = "otel_spans")]
    let _span = tracing::info_span!("build_project", build_type = %build_type);
    let target_dir = project_path.join("target");
    let mut args = vec!["build".to_string()];
    if build_type == BuildType::Release {
        args.push("--release".into());
    }
    args.push("--target-dir".into());
    args.push(target_dir.display().to_string());

    tracing::info!(
        target: "anvil",
        project = %project_path.display(),
        build_type = %build_type,
        "cargo build started"
    );
    let output = run_cargo(project_path, &args).await?;
    if !output.status.success() {
        let tail = stderr_tail(&output);
        tracing::warn!(target: "anvil", status = ?output.status.code(), "cargo build failed");
        bail!("{}: cargo build failed\n{}", config_errors::ERR_BUILD_FAILED, tail);
    }
    tracing::info!(target: "anvil", "cargo build finished");
    Ok(())
}

/// Copy the built binary into `install_dir`, returning its new path.
pub fn copy_binary(project_path: &Path, build_type: BuildType, install_dir: &Path) -> Result<PathBuf> {
    let binary_name = binary_file_name(&package_name(project_path)?);
    let source = project_path
        .join("target")
        .join(build_type.as_str())
        .join(&binary_name);
    std::fs::create_dir_all(install_dir).with_context(|| {
        format!(
            "{}: failed to create directory {}",
            config_errors::ERR_COPY,
            install_dir.display()
        )
    })?;
    let dest = install_dir.join(&binary_name);
    std::fs::copy(&source, &dest).with_context(|| {
        format!(
            "{}: failed to copy binary from {} to {}",
            config_errors::ERR_COPY,
            source.display(),
            dest.display()
        )
    })?;
    tracing::info!(target: "anvil", dest = %dest.display(), "binary copied");
    Ok(dest)
}

/// Vendor the project's dependencies into `<install_dir>/vendor`.
///
/// The source-replacement snippet cargo prints is saved as
/// `<install_dir>/vendor-config.toml`. Returns the number of vendored crates.
pub async fn vendor_dependencies(project_path: &Path, install_dir: &Path) -> Result<usize> {
    #[cfg(feature = "otel_spans")]
    let _span = tracing::info_span!("vendor_dependencies");
    let vendor_dir = install_dir.join("vendor");
    std::fs::create_dir_all(install_dir).with_context(|| {
        format!(
            "{}: failed to create directory {}",
            config_errors::ERR_VENDOR_FAILED,
            install_dir.display()
        )
    })?;
    let args = vec!["vendor".to_string(), vendor_dir.display().to_string()];
    let output = run_cargo(project_path, &args).await?;
    if !output.status.success() {
        bail!(
            "{}: cargo vendor failed\n{}",
            config_errors::ERR_VENDOR_FAILED,
            stderr_tail(&output)
        );
    }

    let snippet_path = install_dir.join("vendor-config.toml");
    std::fs::write(&snippet_path, &output.stdout).with_context(|| {
        format!(
            "{}: failed to write {}",
            config_errors::ERR_VENDOR_FAILED,
            snippet_path.display()
        )
    })?;

    let crates = count_vendored_crates(&vendor_dir);
    tracing::info!(target: "anvil", crates, "dependencies vendored");
    Ok(crates)
}

/// Count crate directories (those holding a `Cargo.toml`) directly under `vendor_dir`.
pub fn count_vendored_crates(vendor_dir: &Path) -> usize {
    walkdir::WalkDir::new(vendor_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.path().join("Cargo.toml").is_file())
        .count()
}

/// Hex-encoded SHA-256 of a file.
pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {} for hashing", path.display()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Fully resolved input of [`install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub project_path: PathBuf,
    pub build_type: BuildType,
    pub install_dir: PathBuf,
    pub vendor: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallReport {
    pub binary: PathBuf,
    pub sha256: String,
    pub build_type: BuildType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendored_crates: Option<usize>,
    pub installed_at: DateTime<Utc>,
}

/// Build, copy and optionally vendor.
pub async fn install(request: &InstallRequest) -> Result<InstallReport> {
    build_project(&request.project_path, request.build_type).await?;
    let binary = copy_binary(
        &request.project_path,
        request.build_type,
        &request.install_dir,
    )?;
    let vendored_crates = if request.vendor {
        Some(vendor_dependencies(&request.project_path, &request.install_dir).await?)
    } else {
        None
    };
    let sha256 = file_sha256(&binary)?;
    Ok(InstallReport {
        binary,
        sha256,
        build_type: request.build_type,
        vendored_crates,
        installed_at: Utc::now(),
    })
}
