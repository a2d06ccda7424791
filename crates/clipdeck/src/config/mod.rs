mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod music_config;
mod notification_config;
mod output_config;
mod overlay_config;
mod playback_config;
mod recording_config;

pub(crate) use {
    capture_config::CaptureConfig,
    config::{Config, write_atomic},
    music_config::MusicConfig,
    notification_config::NotificationConfig,
    output_config::OutputConfig,
    overlay_config::OverlayConfig,
    playback_config::PlaybackConfig,
    recording_config::RecordingConfig,
};

use clipdeck_core::export::{DEFAULT_FILE_PREFIX, DEFAULT_MIME_TYPE};

pub(crate) const DEFAULT_CHUNK_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_EXTENSION: &str = "pcm";
pub(crate) const DEFAULT_INITIAL_VOLUME: f64 = 1.0;
pub(crate) const DEFAULT_SEEK_STEP_SECS: f64 = 5.0;
pub(crate) const DEFAULT_UNMUTE_FALLBACK_VOLUME: f64 = 0.5;
pub(crate) const DEFAULT_DURATION_POLL_INTERVAL_MS: u64 = 200;
pub(crate) const DEFAULT_DURATION_POLL_MAX_ATTEMPTS: u32 = 150;
pub(crate) const DEFAULT_TIME_UPDATE_INTERVAL_MS: u64 = 250;
pub(crate) const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub(crate) const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;
pub(crate) const DEFAULT_OVERLAY_REFRESH_MS: u64 = 100;
pub(crate) const DEFAULT_MUSIC_VOLUME_RATIO: f64 = 0.5;
pub(crate) const DEFAULT_DISMISS_AFTER_MS: u64 = 5000;

pub(crate) fn default_chunk_interval_ms() -> u64 {
    DEFAULT_CHUNK_INTERVAL_MS
}

pub(crate) fn default_mime_type() -> String {
    DEFAULT_MIME_TYPE.to_string()
}

pub(crate) fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

pub(crate) fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

pub(crate) fn default_initial_volume() -> f64 {
    DEFAULT_INITIAL_VOLUME
}

pub(crate) fn default_seek_step_secs() -> f64 {
    DEFAULT_SEEK_STEP_SECS
}

pub(crate) fn default_unmute_fallback_volume() -> f64 {
    DEFAULT_UNMUTE_FALLBACK_VOLUME
}

pub(crate) fn default_duration_poll_interval_ms() -> u64 {
    DEFAULT_DURATION_POLL_INTERVAL_MS
}

pub(crate) fn default_duration_poll_max_attempts() -> u32 {
    DEFAULT_DURATION_POLL_MAX_ATTEMPTS
}

pub(crate) fn default_time_update_interval_ms() -> u64 {
    DEFAULT_TIME_UPDATE_INTERVAL_MS
}

pub(crate) fn default_viewport_width() -> u32 {
    DEFAULT_VIEWPORT_WIDTH
}

pub(crate) fn default_viewport_height() -> u32 {
    DEFAULT_VIEWPORT_HEIGHT
}

pub(crate) fn default_overlay_refresh_ms() -> u64 {
    DEFAULT_OVERLAY_REFRESH_MS
}

pub(crate) fn default_music_volume_ratio() -> f64 {
    DEFAULT_MUSIC_VOLUME_RATIO
}

pub(crate) fn default_dismiss_after_ms() -> u64 {
    DEFAULT_DISMISS_AFTER_MS
}
