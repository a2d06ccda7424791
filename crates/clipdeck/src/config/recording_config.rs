use crate::config::{default_extension, default_file_prefix, default_mime_type};

use clipdeck_core::export::RecordingFormat;
use serde::{Deserialize, Serialize};

/// How recordings are tagged and named on download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// MIME type used when the capture device does not dictate one.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// Prefix of downloaded file names.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Extension of downloaded file names, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            mime_type: default_mime_type(),
            file_prefix: default_file_prefix(),
            extension: default_extension(),
        }
    }
}

impl From<&RecordingConfig> for RecordingFormat {
    fn from(config: &RecordingConfig) -> Self {
        RecordingFormat {
            mime_type: config.mime_type.clone(),
            file_prefix: config.file_prefix.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
        }
    }
}
