//! Configuration constants and structures for Black Anvil
//!
//! This module centralizes all configuration values: install settings read
//! from TOML, script execution limits, and stable error codes.

pub mod errors;
pub mod install;
pub mod limits;

pub use install::InstallConfig;
pub use limits::ScriptLimits;
