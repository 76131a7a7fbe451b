//! Logging initialization for the command line.
//!
//! Logs go to stderr so that reports on stdout stay machine-readable.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging, honoring `RUST_LOG` when it is set.
pub fn setup_logging(quiet: bool) {
    let default_directive = if quiet {
        "warn"
    } else if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::debug!("Logging initialized (default level: {})", default_directive);
}
