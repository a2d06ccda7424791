//! Saving a recorded clip as a named file.

use crate::{CoreResult, clip::ClipHandle};

use chrono::{DateTime, Utc};

/// Default MIME type of recorded clips.
pub const DEFAULT_MIME_TYPE: &str = "video/webm";
/// Default prefix of exported file names.
pub const DEFAULT_FILE_PREFIX: &str = "webcam-recording";
/// Default extension of exported file names.
pub const DEFAULT_EXTENSION: &str = "webm";

/// How recordings are tagged and named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFormat {
    /// MIME type of sealed clips.
    pub mime_type: String,
    /// Prefix of exported file names.
    pub file_prefix: String,
    /// Extension of exported file names, without the dot.
    pub extension: String,
}

impl Default for RecordingFormat {
    fn default() -> Self {
        Self {
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Build `<prefix>-<YYYY-MM-DD_HH-MM-SS>.<extension>` from a UTC instant.
///
/// The timestamp is the first 19 characters of ISO-8601 with `T` replaced by
/// `_` and colons by `-`.
pub fn export_file_name(prefix: &str, now: DateTime<Utc>, extension: &str) -> String {
    format!("{prefix}-{}.{extension}", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Platform "save as file" action.
pub trait ClipExporter: Send {
    /// Save the referenced clip under `file_name`.
    fn save(&mut self, file_name: &str, clip: &ClipHandle) -> CoreResult<()>;
}
