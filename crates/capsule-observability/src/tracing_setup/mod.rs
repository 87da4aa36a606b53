//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use capsule_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "CAPSULE_LOG";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `CAPSULE_LOG` environment variable for filtering.
/// Defaults to `info` level if not set. Returns false when a global
/// subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

/// `CAPSULE_LOG` wins over the configured level.
pub fn init_from_config(config: &ObservabilityConfig) -> bool {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => init_tracing_with_filter(&directive),
        _ => init_tracing_with_filter(&config.log_level),
    }
}
