use crate::notify::Severity;

use error_location::ErrorLocation;
use thiserror::Error;

/// Studio errors with source location tracking.
///
/// Every variant is handled at the user action that raised it and ends up
/// as a notification; none of them is fatal to the running session.
#[derive(Error, Debug)]
pub enum StudioError {
    /// Capture access was refused by the user or the platform.
    #[error("Capture permission denied: {reason} {location}")]
    PermissionDenied {
        /// Reason reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No capture device exists or it could not be opened.
    #[error("Capture device unavailable: {reason} {location}")]
    DeviceUnavailable {
        /// Reason reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The encoder refused to start on a granted stream, or to finalize it.
    #[error("Encoder failure: {reason} {location}")]
    EncoderFailure {
        /// Description of the encoder error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An uploaded music file does not declare an audio media type.
    #[error("Invalid media type: {mime_type:?} {location}")]
    InvalidMediaType {
        /// The media type declared by the file.
        mime_type: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A picked music file could not be read.
    #[error("Media read failed for {name:?}: {reason} {location}")]
    MediaReadFailed {
        /// File name as picked.
        name: String,
        /// Why reading failed.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform rejected starting playback of the music track.
    #[error("Playback start failure: {reason} {location}")]
    PlaybackStartFailure {
        /// Reason reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Download attempted with nothing captured.
    #[error("No recording available {location}")]
    NoRecordingAvailable {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Music toggle attempted with nothing loaded.
    #[error("No music track loaded {location}")]
    NoTrackLoaded {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Transport control used while no clip is bound to the player.
    #[error("No clip loaded for playback {location}")]
    NoClipLoaded {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The exporter failed to save the clip.
    #[error("Export failed: {reason} {location}")]
    ExportFailed {
        /// Description of the export error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl StudioError {
    /// Message and severity shown to the user for this error.
    pub fn user_message(&self) -> (String, Severity) {
        match self {
            StudioError::PermissionDenied { .. } | StudioError::DeviceUnavailable { .. } => (
                "Error: Could not access webcam or microphone. Please check permissions."
                    .to_string(),
                Severity::Error,
            ),
            StudioError::EncoderFailure { .. } => (
                "Error: The recorder failed on the selected device.".to_string(),
                Severity::Error,
            ),
            StudioError::InvalidMediaType { .. } => (
                "Please upload a valid audio file (e.g., MP3, WAV).".to_string(),
                Severity::Error,
            ),
            StudioError::MediaReadFailed { name, .. } => (
                format!("Could not read music file \"{name}\"."),
                Severity::Error,
            ),
            StudioError::PlaybackStartFailure { .. } => (
                "Could not play music. Make sure the uploaded audio file is valid and not corrupted."
                    .to_string(),
                Severity::Error,
            ),
            StudioError::NoRecordingAvailable { .. } => (
                "No recording available to download.".to_string(),
                Severity::Warning,
            ),
            StudioError::NoTrackLoaded { .. } => (
                "Please upload a music file first!".to_string(),
                Severity::Warning,
            ),
            StudioError::NoClipLoaded { .. } => (
                "Nothing to play yet. Record a clip first.".to_string(),
                Severity::Warning,
            ),
            StudioError::ExportFailed { .. } => {
                ("Could not save the recording.".to_string(), Severity::Error)
            }
        }
    }
}

/// Result type alias using [`StudioError`].
pub type Result<T> = std::result::Result<T, StudioError>;
