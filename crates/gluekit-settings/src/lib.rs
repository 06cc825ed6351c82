//! GlueKit Settings Crate
//!
//! Handles preview configuration, validation and persistence.

pub mod config;
pub mod error;

pub use config::{Config, LoggingSettings, TrajectorySettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
