//! Error types for the settings crate.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading, validating or saving the configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The config file exists but could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The config file (or its directory) could not be written
    #[error("Cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The file content is not valid JSON/TOML for [`crate::Config`]
    #[error("Malformed config {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The configuration could not be encoded for saving
    #[error("Cannot encode config: {0}")]
    Encode(String),

    /// A configuration value is out of range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(path: &Path, reason: impl ToString) -> Self {
        SettingsError::Parse {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Errors about where and how the configuration is stored
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.json` and `.toml` are understood
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// No per-user config directory on this platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = SettingsError::Read {
            path: PathBuf::from("/etc/gluekit/config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Cannot read /etc/gluekit/config.toml: denied");

        let err = SettingsError::parse(Path::new("cell.json"), "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Malformed config cell.json: expected value at line 1"
        );
    }

    #[test]
    fn test_invalid_setting_display() {
        let err = SettingsError::invalid("trajectory.trail_length", "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid setting 'trajectory.trail_length': must be > 0"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let settings_err: SettingsError = ConfigError::UnsupportedFormat("yaml".to_string()).into();
        assert!(matches!(settings_err, SettingsError::Config(_)));
        assert_eq!(
            settings_err.to_string(),
            "Config error: Unsupported config format: yaml"
        );
    }
}
