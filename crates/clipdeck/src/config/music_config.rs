use crate::config::default_music_volume_ratio;

use serde::{Deserialize, Serialize};

/// Background music configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Music volume relative to the playback volume.
    #[serde(default = "default_music_volume_ratio")]
    pub volume_ratio: f64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            volume_ratio: default_music_volume_ratio(),
        }
    }
}
