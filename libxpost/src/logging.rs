//! Logging configuration for the xpost CLI
//!
//! Logs go to stderr so stdout stays clean for operator-facing output.
//! Format and level can be set with `XPOST_LOG_FORMAT` (text or json) and
//! `XPOST_LOG_LEVEL`; `--verbose` bumps the default level to debug.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output
    Text,
    /// Machine-parseable JSON, one object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json",
                s
            )),
        }
    }
}

/// Initialize logging for a binary
///
/// Respects `XPOST_LOG_FORMAT` and `XPOST_LOG_LEVEL`; `verbose` overrides
/// the level to debug. Panics if a subscriber is already installed.
pub fn init(verbose: bool) {
    let format = std::env::var("XPOST_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let default_level = if verbose { "debug" } else { "info" };
    let level = std::env::var("XPOST_LOG_LEVEL").unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }
}
