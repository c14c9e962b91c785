//! Script execution limits

/// Largest script accepted by the host, in bytes.
pub const DEFAULT_MAX_SCRIPT_BYTES: usize = 256 * 1024; // 256 KiB

/// Wall-clock budget for a single evaluation.
pub const DEFAULT_SCRIPT_TIMEOUT_MS: u64 = 10_000;
// pub const MAX_SCRIPT_TIMEOUT_MS: u64 = 120_000;

/// Limits applied to every `run_starlark` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLimits {
    pub max_script_bytes: usize,
    pub timeout_ms: u64,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_script_bytes: DEFAULT_MAX_SCRIPT_BYTES,
            timeout_ms: DEFAULT_SCRIPT_TIMEOUT_MS,
        }
    }
}

impl ScriptLimits {
    /// Load limits from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - ANVIL_SCRIPT_MAX_BYTES: Maximum script size in bytes (default: 262144)
    /// - ANVIL_SCRIPT_TIMEOUT_MS: Evaluation deadline in milliseconds (default: 10000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_script_bytes = lookup("ANVIL_SCRIPT_MAX_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_SCRIPT_BYTES);

        let timeout_ms = lookup("ANVIL_SCRIPT_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_SCRIPT_TIMEOUT_MS);

        Self {
            max_script_bytes,
            timeout_ms,
        }
    }
}
