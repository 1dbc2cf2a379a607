//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global subscriber; `RUST_LOG` wins over the configured level
///
/// Logs go to stderr so that reports on stdout stay machine readable.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level: tracing::Level = if verbose {
        tracing::Level::DEBUG
    } else {
        config.level.parse().context("Invalid log level")?
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.context("Failed to install tracing subscriber")
}
