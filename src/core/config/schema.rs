//! core::config::schema
//!
//! Configuration schema types.
//!
//! Unknown keys are rejected so that typos surface as errors instead of
//! being silently ignored.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// Contents of `config.toml`.
///
/// # Example
///
/// ```toml
/// log_level = "info"
///
/// [clone]
/// branch = "main"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Default log filter when neither `RUST_LOG` nor a flag sets one
    pub log_level: Option<String>,

    /// Clone defaults
    pub clone: Option<CloneDefaults>,
}

impl ConfigFile {
    /// Accepted `log_level` values.
    pub const LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            if !Self::LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid log_level '{}', must be one of: {}",
                    level,
                    Self::LOG_LEVELS.join(", ")
                )));
            }
        }

        if let Some(clone) = &self.clone {
            clone.validate()?;
        }

        Ok(())
    }
}

/// Defaults for `mklr clone`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CloneDefaults {
    /// Branch to clone when `--branch` is not given
    pub branch: Option<String>,
}

impl CloneDefaults {
    /// Validate the clone defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(branch) = &self.branch {
            BranchName::new(branch.as_str()).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid clone branch: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            log_level = "debug"

            [clone]
            branch = "branch1"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.clone.as_ref().and_then(|c| c.branch.as_deref()),
            Some("branch1")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigFile>("colour = true").is_err());
        assert!(toml::from_str::<ConfigFile>("[clone]\ndepth = 1").is_err());
    }

    #[test]
    fn invalid_log_level() {
        let config = ConfigFile {
            log_level: Some("loud".into()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn invalid_clone_branch() {
        let config = ConfigFile {
            clone: Some(CloneDefaults {
                branch: Some("bad name".into()),
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
