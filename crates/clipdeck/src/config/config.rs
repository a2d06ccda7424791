//! Configuration management for clipdeck.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{
        CaptureConfig, MusicConfig, NotificationConfig, OutputConfig, OverlayConfig,
        PlaybackConfig, RecordingConfig,
    },
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use clipdeck_core::StudioSettings;
use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Capture device configuration.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Recording naming configuration.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Transport configuration.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Timestamp overlay configuration.
    #[serde(default)]
    pub overlay: OverlayConfig,
    /// Background music configuration.
    #[serde(default)]
    pub music: MusicConfig,
    /// Notification configuration.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Download destination.
    #[serde(default)]
    pub output: OutputConfig,
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

            let config = Self::from_toml(&contents)?;
            config.validate()?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Parse configuration from TOML text. Missing sections take defaults.
    #[track_caller]
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Reject zero periods and out-of-range levels.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let periods = [
            ("capture.chunk_interval_ms", self.capture.chunk_interval_ms),
            (
                "playback.duration_poll_interval_ms",
                self.playback.duration_poll_interval_ms,
            ),
            (
                "playback.time_update_interval_ms",
                self.playback.time_update_interval_ms,
            ),
            ("overlay.refresh_interval_ms", self.overlay.refresh_interval_ms),
            ("notifications.dismiss_after_ms", self.notifications.dismiss_after_ms),
        ];
        if let Some((key, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(invalid_value(key, "must be greater than 0"));
        }

        if self.playback.duration_poll_max_attempts == 0 {
            return Err(invalid_value(
                "playback.duration_poll_max_attempts",
                "must be greater than 0",
            ));
        }

        let levels = [
            ("playback.initial_volume", self.playback.initial_volume),
            (
                "playback.unmute_fallback_volume",
                self.playback.unmute_fallback_volume,
            ),
            ("music.volume_ratio", self.music.volume_ratio),
        ];
        if let Some((key, _)) = levels
            .iter()
            .find(|(_, level)| !(0.0..=1.0).contains(level))
        {
            return Err(invalid_value(key, "must be between 0 and 1"));
        }

        let step = self.playback.seek_step_secs;
        if !step.is_finite() || step <= 0.0 {
            return Err(invalid_value(
                "playback.seek_step_secs",
                "must be a positive number of seconds",
            ));
        }

        Ok(())
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

        write_atomic(&config_path, contents.as_bytes()).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to write config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Settings for every studio component.
    pub fn studio_settings(&self) -> StudioSettings {
        StudioSettings {
            format: (&self.recording).into(),
            playback: (&self.playback).into(),
            overlay: (&self.overlay).into(),
            music_volume_ratio: self.music.volume_ratio,
            notification_dismiss_after: Duration::from_millis(self.notifications.dismiss_after_ms),
        }
    }

    /// Directory downloads are written to.
    ///
    /// Falls back to the user's download directory, then to the data directory.
    #[track_caller]
    pub fn download_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.output.download_dir {
            return Ok(dir.clone());
        }

        if let Some(dir) = UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        {
            return Ok(dir);
        }

        let proj_dirs = Self::project_dirs()?;
        Ok(proj_dirs.data_dir().join("recordings"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "clipdeck", "Clipdeck").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
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

        info!("Default config created");

        Ok(config)
    }
}

#[track_caller]
fn invalid_value(key: &str, rule: &str) -> AppError {
    AppError::ConfigError {
        reason: format!("Invalid value for {key}: {rule}"),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Write `contents` to `path` through a temporary sibling and a rename.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut temp_file = fs::File::create(&temp_path)?;
    temp_file.write_all(contents)?;
    temp_file.sync_all()?;

    fs::rename(&temp_path, path)
}
