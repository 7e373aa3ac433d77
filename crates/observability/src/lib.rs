//! Tracing and logging setup shared by devicehub binaries and tests.

/// Logging configuration (env driven).
pub mod config;
/// Tracing subscriber installation.
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// An invalid environment falls back to the defaults and reports the problem
/// through the installed subscriber. Safe to call multiple times; subsequent
/// calls become no-ops.
pub fn init() {
    match ObservabilityConfig::from_env() {
        Ok(config) => tracing::init_with(&config),
        Err(err) => {
            tracing::init_with(&ObservabilityConfig::default());
            ::tracing::warn!(error = %format!("{err:#}"), "invalid logging configuration, using defaults");
        }
    }
}
