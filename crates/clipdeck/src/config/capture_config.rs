use crate::config::default_chunk_interval_ms;

use serde::{Deserialize, Serialize};

/// Capture device configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Selected input device name (None = default device).
    #[serde(default)]
    pub selected_device: Option<String>,
    /// How often the encoder emits a chunk, in milliseconds.
    #[serde(default = "default_chunk_interval_ms")]
    pub chunk_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            selected_device: None,
            chunk_interval_ms: default_chunk_interval_ms(),
        }
    }
}
