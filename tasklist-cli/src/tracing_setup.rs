//! Tracing setup for the tasklist CLI
//!
//! Usage:
//!   tasklist --debug serve              # Debug logging to console
//!   RUST_LOG=tasklist_server=debug tasklist serve
//!
//! Environment variables:
//!   RUST_LOG                            # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Filter used when neither RUST_LOG nor --debug is given
    pub default_filter: &'static str,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_filter: "info,tower_http=debug",
        }
    }
}

impl TracingConfig {
    /// Quiet configuration for the terminal UI, which owns the screen
    pub fn for_tui(debug: bool) -> Self {
        Self {
            debug,
            default_filter: "off",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if self.debug {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new(self.default_filter)
            }
        })
    }
}

/// Initialize console tracing (stderr, compact format)
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
