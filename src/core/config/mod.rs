//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! mklr reads one optional user-level file. Nothing in the library itself
//! depends on it; only the CLI consults it for defaults.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$MKLR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/mklr/config.toml`
//! 3. `~/.mklr/config.toml`
//!
//! A missing file is not an error.
//!
//! # Example
//!
//! ```no_run
//! use mklr::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! if let Some(branch) = config.clone_branch() {
//!     println!("cloning {} by default", branch);
//! }
//! ```

pub mod schema;

pub use schema::{CloneDefaults, ConfigFile};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::BranchName;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MKLR_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file was found)
    pub file: ConfigFile,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Load using an explicit environment lookup and home directory.
    ///
    /// `load` delegates here; tests call it directly to avoid touching the
    /// process environment.
    pub fn load_with(
        env: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        match Self::search(env, home) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Candidate locations, most specific first.
    fn candidates(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(explicit) = env(CONFIG_ENV) {
            paths.push(PathBuf::from(explicit));
        }
        if let Some(xdg) = env("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("mklr/config.toml"));
        }
        if let Some(home) = home {
            paths.push(home.join(".mklr/config.toml"));
        }
        paths
    }

    fn search(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
        Self::candidates(env, home)
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Read, parse, and validate a specific config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Path of the loaded file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Default log filter, if configured.
    pub fn log_level(&self) -> Option<&str> {
        self.file.log_level.as_deref()
    }

    /// Branch to clone when none is requested, if configured.
    pub fn clone_branch(&self) -> Option<BranchName> {
        self.file
            .clone
            .as_ref()
            .and_then(|c| c.branch.as_deref())
            .and_then(|b| BranchName::new(b).ok())
    }
}
