//! Environment-driven logging configuration.

use anyhow::{Context, bail};

/// Env var holding the tracing filter directives.
pub const FILTER_ENV: &str = "RUST_LOG";
/// Env var selecting the log output format (`json` or `pretty`).
pub const FORMAT_ENV: &str = "DEVICEHUB_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl core::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => bail!("unknown log format `{other}` (expected `json` or `pretty`)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, e.g. `info,devicehub_infra=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl ObservabilityConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup (tests, config files).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let filter = lookup(FILTER_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.filter);
        let format = match lookup(FORMAT_ENV) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid {FORMAT_ENV}"))?,
            None => defaults.format,
        };
        Ok(Self { filter, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_info_json() {
        let config = ObservabilityConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ObservabilityConfig::default());
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn reads_filter_and_format() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            (FILTER_ENV, "debug,devicehub_infra=trace"),
            (FORMAT_ENV, "Pretty"),
        ]))
        .unwrap();
        assert_eq!(config.filter, "debug,devicehub_infra=trace");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        let config = ObservabilityConfig::from_lookup(lookup(&[(FILTER_ENV, "  ")])).unwrap();
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn rejects_unknown_format() {
        let err = ObservabilityConfig::from_lookup(lookup(&[(FORMAT_ENV, "xml")])).unwrap_err();
        assert!(format!("{err:#}").contains("unknown log format `xml`"));
    }
}
