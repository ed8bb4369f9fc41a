//! Tracing setup for the goalimpact CLI
//!
//! Usage:
//!   goalimpact --debug ...                       # Debug logging to stderr
//!   RUST_LOG=goalimpact_search=debug goalimpact  # Fine-grained log control
//!
//! The terminal UI owns the screen, so `tui` logs go to
//! `~/.goalimpact/goalimpact.log` instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use goalimpact_search::GoalImpactConfig;
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Write to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl TracingConfig {
    /// Default log file used while the terminal UI is running
    pub fn default_log_file() -> PathBuf {
        GoalImpactConfig::config_dir().join("goalimpact.log")
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => init_file(config.debug, path),
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter(config.debug))
            .with_target(config.debug) // Show targets in debug mode
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}

fn init_file(debug: bool, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context(format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!(err))
}
