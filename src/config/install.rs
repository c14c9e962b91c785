//! Install settings read from a TOML file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::errors as config_errors;
use crate::install::BuildType;

/// Values for `black-anvil install`. Anything left out is prompted for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    pub project_path: Option<String>,
    pub build_type: Option<BuildType>,
    pub install_dir: Option<String>,
    pub vendor: Option<bool>,
}

impl InstallConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!(
                "{}: failed to read config file {}",
                config_errors::ERR_CONFIG_READ,
                path.display()
            )
        })?;
        Self::from_toml(&contents)
    }

    /// `<config dir>/black-anvil/install.toml`, e.g. `~/.config/black-anvil/install.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("black-anvil").join("install.toml"))
    }

    /// Load the file at [`InstallConfig::default_path`], or an empty config when absent.
    pub fn load_default() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents)
            .with_context(|| format!("{}: failed to parse config", config_errors::ERR_CONFIG_PARSE))
    }
}
