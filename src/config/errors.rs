//! Error code constants

/// Script host error codes (0600-0699)
pub const ERR_SCRIPT_TOO_LARGE: &str = "E-ANVIL-0601";
pub const ERR_SCRIPT_PARSE: &str = "E-ANVIL-0602";
pub const ERR_SCRIPT_EVAL: &str = "E-ANVIL-0603";
pub const ERR_SCRIPT_TIMEOUT: &str = "E-ANVIL-0604";
pub const ERR_SCRIPT_JOIN: &str = "E-ANVIL-0605";

/// Command bridge error codes (0700-0799)
pub const ERR_UNKNOWN_COMMAND: &str = "E-ANVIL-0701";
pub const ERR_INVALID_ARGS: &str = "E-ANVIL-0702";

/// Install pipeline error codes (1500-1599)
pub const ERR_SPAWN: &str = "E-ANVIL-1501";
pub const ERR_BUILD_FAILED: &str = "E-ANVIL-1502";
pub const ERR_MANIFEST: &str = "E-ANVIL-1503";
pub const ERR_COPY: &str = "E-ANVIL-1504";
pub const ERR_VENDOR_FAILED: &str = "E-ANVIL-1505";

/// Configuration error codes (1600-1699)
pub const ERR_CONFIG_READ: &str = "E-ANVIL-1601";
pub const ERR_CONFIG_PARSE: &str = "E-ANVIL-1602";
