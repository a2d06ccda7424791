use crate::config::{
    default_duration_poll_interval_ms, default_duration_poll_max_attempts, default_initial_volume,
    default_seek_step_secs, default_time_update_interval_ms, default_unmute_fallback_volume,
    default_viewport_height, default_viewport_width,
};

use std::time::Duration;

use clipdeck_core::playback::PlaybackSettings;
use serde::{Deserialize, Serialize};

/// Transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Volume applied at startup, in `[0, 1]`.
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
    /// Seconds moved by rewind/forward.
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: f64,
    /// Volume restored by unmute when none was recorded.
    #[serde(default = "default_unmute_fallback_volume")]
    pub unmute_fallback_volume: f64,
    /// How often an unknown duration is re-checked, in milliseconds.
    #[serde(default = "default_duration_poll_interval_ms")]
    pub duration_poll_interval_ms: u64,
    /// Re-checks before giving up on an unknown duration.
    #[serde(default = "default_duration_poll_max_attempts")]
    pub duration_poll_max_attempts: u32,
    /// How often the player reports its position while playing, in milliseconds.
    #[serde(default = "default_time_update_interval_ms")]
    pub time_update_interval_ms: u64,
    /// Initial width of the player viewport in pixels.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    /// Initial height of the player viewport in pixels.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
            seek_step_secs: default_seek_step_secs(),
            unmute_fallback_volume: default_unmute_fallback_volume(),
            duration_poll_interval_ms: default_duration_poll_interval_ms(),
            duration_poll_max_attempts: default_duration_poll_max_attempts(),
            time_update_interval_ms: default_time_update_interval_ms(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl From<&PlaybackConfig> for PlaybackSettings {
    fn from(config: &PlaybackConfig) -> Self {
        PlaybackSettings {
            seek_step_secs: config.seek_step_secs,
            initial_volume: config.initial_volume,
            unmute_fallback_volume: config.unmute_fallback_volume,
            duration_poll_interval: Duration::from_millis(config.duration_poll_interval_ms),
            duration_poll_max_attempts: config.duration_poll_max_attempts,
        }
    }
}
