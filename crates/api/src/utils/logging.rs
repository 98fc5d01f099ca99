//! Tracing setup and structured command logging

use std::time::Duration;

use calstats_domain::{CalStatsError, LoggingConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. Output goes to stderr so it
/// never interleaves with the interactive screen on stdout.
///
/// # Errors
/// Returns `CalStatsError::Config` if the level is not a valid filter or a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), CalStatsError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CalStatsError::Config(format!("Invalid log level '{}': {e}", config.level)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    };
    installed.map_err(|e| CalStatsError::Config(format!("Failed to install subscriber: {e}")))
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"timeline::navigate"`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, outcome: Result<(), &CalStatsError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(()) => info!(command, duration_ms, "command_execution_success"),
        Err(error) => warn!(
            command,
            duration_ms,
            error_type = error_label(error),
            error = %error,
            "command_execution_failure"
        ),
    }
}

/// Convert a `CalStatsError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &CalStatsError) -> &'static str {
    error.label()
}
