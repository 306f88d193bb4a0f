//! Logging setup
//!
//! Log output goes to stderr so that reports printed on stdout stay clean.
//! `RUST_LOG` wins over the configured filter; `--verbose` raises the
//! default filter to debug.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "lunchsplit=debug";

/// Picks the filter directives used when `RUST_LOG` is not set.
pub fn default_filter(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose { VERBOSE_FILTER } else { &config.filter }
}

/// Initialize the global subscriber. Call once, from the binary.
pub fn init(config: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(config, verbose)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}
