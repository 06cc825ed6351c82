//! Configuration for the trajectory preview
//!
//! Supports JSON and TOML files, chosen by extension, stored in the
//! platform config directory by default.
//!
//! Configuration is organized into sections:
//! - Trajectory preview (view size, refresh interval, trail behaviour, assets)
//! - Logging (default filter and output format)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Trajectory preview settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectorySettings {
    /// Preview width in pixels
    pub image_width: u32,
    /// Preview height in pixels
    pub image_height: u32,
    /// Display refresh interval in milliseconds
    pub display_interval_ms: u64,
    /// Maximum number of samples kept in the trail
    pub trail_length: usize,
    /// Insert intermediate samples between distant points
    pub interpolate_motion: bool,
    /// Number of intermediate samples per gap
    pub interpolation_points: usize,
    /// Minimum gap (pixels) that triggers interpolation
    pub interpolation_threshold: f64,
    /// Moving-average window used when drawing
    pub smoothing_window: usize,
    /// Number of trailing points redrawn with the highlight stroke
    pub highlight_points: usize,
    /// Draw a marker at the current robot position
    pub show_current_point: bool,
    /// Marker icon edge length in pixels
    pub marker_size: u32,
    /// Image shown until the first camera frame arrives
    pub placeholder_path: Option<PathBuf>,
    /// RGBA icon used as current position marker
    pub marker_icon_path: Option<PathBuf>,
}

impl Default for TrajectorySettings {
    fn default() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            display_interval_ms: 30,
            trail_length: 100,
            interpolate_motion: true,
            interpolation_points: 3,
            interpolation_threshold: 5.0,
            smoothing_window: 3,
            highlight_points: 5,
            show_current_point: false,
            marker_size: 36,
            placeholder_path: None,
            marker_icon_path: None,
        }
    }
}

impl TrajectorySettings {
    /// Validate trajectory settings
    pub fn validate(&self) -> SettingsResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(SettingsError::invalid(
                "trajectory.image_size",
                "preview dimensions must be > 0",
            ));
        }
        if self.display_interval_ms == 0 {
            return Err(SettingsError::invalid(
                "trajectory.display_interval_ms",
                "must be > 0",
            ));
        }
        if self.trail_length == 0 {
            return Err(SettingsError::invalid("trajectory.trail_length", "must be > 0"));
        }
        if !self.interpolation_threshold.is_finite() || self.interpolation_threshold < 0.0 {
            return Err(SettingsError::invalid(
                "trajectory.interpolation_threshold",
                "must be a finite value >= 0",
            ));
        }
        if self.smoothing_window == 0 {
            return Err(SettingsError::invalid(
                "trajectory.smoothing_window",
                "must be > 0",
            ));
        }
        if self.marker_size == 0 {
            return Err(SettingsError::invalid("trajectory.marker_size", "must be > 0"));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Multi-line human readable output instead of compact lines
    pub pretty: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Trajectory preview
    pub trajectory: TrajectorySettings,
    /// Logging
    pub logging: LoggingSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/gluekit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("gluekit").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => {
                serde_json::from_str(&content).map_err(|e| SettingsError::parse(path, e))?
            }
            Format::Toml => toml::from_str(&content).map_err(|e| SettingsError::parse(path, e))?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults if it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| SettingsError::Encode(e.to_string()))?,
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| SettingsError::Encode(e.to_string()))?
            }
        };

        let write_error = |source: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, content).map_err(write_error)?;
        tracing::debug!("Saved config to {}", path.display());

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.trajectory.validate()?;

        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::invalid("logging.level", "must not be empty"));
        }

        Ok(())
    }
}
