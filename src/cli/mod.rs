//! cli
//!
//! Command-line interface for mklr.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and initialize logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers call into [`crate::command`] and
//! [`crate::repository`]; they never touch `git2` or spawn processes
//! themselves.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Repository location from `--repo`
    pub repo: PathBuf,
    /// Print JSON instead of text
    pub json: bool,
    /// Suppress informational output
    pub quiet: bool,
    /// Loaded configuration
    pub config: Config,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the process
/// exit code on success.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();
    let config = Config::load().context("Failed to load configuration")?;

    init_logging(default_filter(cli.debug, cli.quiet, config.log_level()));
    if let Some(path) = config.path() {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let ctx = Context {
        repo: cli.repo,
        json: cli.json,
        quiet: cli.quiet,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}

/// The log filter used when `RUST_LOG` is not set.
///
/// `--debug` and `--quiet` win over the configured level.
pub fn default_filter(debug: bool, quiet: bool, configured: Option<&str>) -> String {
    let level = if debug {
        "debug"
    } else if quiet {
        "error"
    } else {
        configured.unwrap_or("warn")
    };
    format!("mklr={level}")
}

/// Install the global subscriber, writing to stderr.
///
/// stdout is reserved for command results.
fn init_logging(default: String) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; that one wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_precedence() {
        assert_eq!(default_filter(false, false, None), "mklr=warn");
        assert_eq!(default_filter(false, false, Some("info")), "mklr=info");
        assert_eq!(default_filter(true, false, Some("info")), "mklr=debug");
        assert_eq!(default_filter(false, true, Some("trace")), "mklr=error");
    }
}
