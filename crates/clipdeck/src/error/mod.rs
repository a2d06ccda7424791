use clipdeck_core::StudioError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the clipdeck binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Studio error from clipdeck-core.
    #[error("Studio error: {source} {location}")]
    Studio {
        /// The underlying studio error.
        #[source]
        source: StudioError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A console line could not be parsed into a command.
    #[error("Invalid command: {reason} {location}")]
    InvalidCommand {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<StudioError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<StudioError> for AppError {
    #[track_caller]
    fn from(source: StudioError) -> Self {
        AppError::Studio {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
