//! Tracing subscriber setup for the `overseer` binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "OVERSEER_LOG";
const DEFAULT_LEVEL: &str = "warn";

/// Installs a stderr `fmt` subscriber filtered by `OVERSEER_LOG` (default `warn`).
///
/// Stdout carries command output, so logs always go to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), String> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))
}
