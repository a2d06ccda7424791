use crate::{
    export::RecordingFormat,
    music::DEFAULT_VOLUME_RATIO,
    notify::DEFAULT_DISMISS_AFTER,
    overlay::OverlaySettings,
    playback::PlaybackSettings,
};

use std::time::Duration;

/// Tuning of every studio component.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioSettings {
    /// Clip tagging and export naming.
    pub format: RecordingFormat,
    /// Transport settings.
    pub playback: PlaybackSettings,
    /// Timestamp overlay settings.
    pub overlay: OverlaySettings,
    /// Music volume relative to playback volume.
    pub music_volume_ratio: f64,
    /// How long notifications stay visible.
    pub notification_dismiss_after: Duration,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            format: RecordingFormat::default(),
            playback: PlaybackSettings::default(),
            overlay: OverlaySettings::default(),
            music_volume_ratio: DEFAULT_VOLUME_RATIO,
            notification_dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }
}
