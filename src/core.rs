use once_cell::sync::OnceCell;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

pub static APP_NAME: &str = "Black Anvil";

// ----------------------------------------------------------------------------
// Tracing
// ----------------------------------------------------------------------------

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Install the global `tracing` subscriber once per process.
///
/// Filtering follows `RUST_LOG`; without it only warnings and errors are
/// shown so command output stays readable.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        use tracing_subscriber::{fmt, EnvFilter};
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::debug!(target: "anvil", app = APP_NAME, "tracing initialized");
    });
}
