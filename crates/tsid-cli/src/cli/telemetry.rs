//! Logging initialization for the `tsid` binary.
//!
//! Sets up structured logging using the `tracing` ecosystem. Identifiers go
//! to stdout, so all log output is written to stderr.
//!
//! ## Behavior
//!
//! - Pulls filtering rules from `RUST_LOG` or defaults to `warn`.
//! - Includes thread ID and line number for traceability.
//! - Timestamped using local time (RFC 3339 format).

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init_tracing() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
