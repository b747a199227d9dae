//! Configuration management for tray-recorder.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{HotkeyConfig, RecorderConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf, time::Duration};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Recording session settings.
    #[serde(default)]
    pub recorder: RecorderConfig,
    /// Global shortcut settings.
    #[serde(default)]
    pub hotkey: HotkeyConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::from_toml_str(&contents)?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    #[track_caller]
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Reject values the recorder cannot run with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if self.recorder.poll_interval_ms == 0 {
            return Err(AppError::ConfigError {
                reason: "recorder.poll_interval_ms must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.recorder.ffmpeg_path.as_os_str().is_empty() {
            return Err(AppError::ConfigError {
                reason: "recorder.ffmpeg_path must not be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.hotkey.enabled && self.hotkey.shortcut.trim().is_empty() {
            return Err(AppError::ConfigError {
                reason: "hotkey.shortcut must not be empty while the hotkey is enabled"
                    .to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Interval between completion-detection ticks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.recorder.poll_interval_ms)
    }

    /// Directory finished recordings are moved into.
    ///
    /// Uses the configured directory, else the desktop, else the home directory.
    #[track_caller]
    pub fn output_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.recorder.output_dir {
            return Ok(dir.clone());
        }

        let user_dirs = UserDirs::new().ok_or_else(|| AppError::ConfigError {
            reason: "Failed to resolve the home directory".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(user_dirs
            .desktop_dir()
            .unwrap_or_else(|| user_dirs.home_dir())
            .to_path_buf())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "tray-recorder", "Tray-Recorder").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get config directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();

        config.save()?;

        info!(
            poll_interval_ms = config.recorder.poll_interval_ms,
            shortcut = %config.hotkey.shortcut,
            "Default config created"
        );

        Ok(config)
    }
}
