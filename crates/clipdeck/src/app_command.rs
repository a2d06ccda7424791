use crate::{AppError, AppResult};

use std::{panic::Location, path::PathBuf};

use clipdeck_core::UserAction;
use error_location::ErrorLocation;

/// Console help text.
pub const HELP: &str = "commands: start | stop | play | rewind | forward | seek <0..1> | \
volume <0..1> | mute | fullscreen | download | timestamp | music [path] | music-toggle | \
resize <w> <h> | help | quit";

/// Commands typed on the console.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Forward a user action to the studio.
    Studio(UserAction),
    /// Read a music file from disk and hand it to the studio.
    LoadMusic(PathBuf),
    /// Change the player viewport size.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Print the command list.
    Help,
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Parse one console line. Blank lines yield `None`.
    #[track_caller]
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => AppCommand::Studio(UserAction::StartCapture),
            "stop" => AppCommand::Studio(UserAction::StopCapture),
            "play" | "pause" => AppCommand::Studio(UserAction::TogglePlayPause),
            "rewind" => AppCommand::Studio(UserAction::Rewind),
            "forward" => AppCommand::Studio(UserAction::Forward),
            "seek" => AppCommand::Studio(UserAction::Seek(fraction(name, words.next())?)),
            "volume" => AppCommand::Studio(UserAction::SetVolume(fraction(name, words.next())?)),
            "mute" => AppCommand::Studio(UserAction::ToggleMute),
            "fullscreen" => AppCommand::Studio(UserAction::Fullscreen),
            "download" => AppCommand::Studio(UserAction::Download),
            "timestamp" => AppCommand::Studio(UserAction::ToggleTimestamp),
            "music" => {
                // The rest of the line is the path, spaces included.
                let path = line
                    .trim_start()
                    .strip_prefix(name)
                    .unwrap_or_default()
                    .trim();
                if path.is_empty() {
                    AppCommand::Studio(UserAction::ChooseMusic(None))
                } else {
                    AppCommand::LoadMusic(PathBuf::from(path))
                }
            }
            "music-toggle" => AppCommand::Studio(UserAction::ToggleMusic),
            "resize" => AppCommand::Resize {
                width: dimension(name, words.next())?,
                height: dimension(name, words.next())?,
            },
            "help" | "?" => AppCommand::Help,
            "quit" | "exit" => AppCommand::Shutdown,
            other => {
                return Err(AppError::InvalidCommand {
                    reason: format!("unknown command {other:?}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        Ok(Some(command))
    }
}

#[track_caller]
fn fraction(command: &str, arg: Option<&str>) -> AppResult<f64> {
    let value = arg
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::InvalidCommand {
            reason: format!("{command} expects a number between 0 and 1"),
            location: ErrorLocation::from(Location::caller()),
        })?;
    Ok(value)
}

#[track_caller]
fn dimension(command: &str, arg: Option<&str>) -> AppResult<u32> {
    arg.and_then(|raw| raw.parse::<u32>().ok())
        .ok_or_else(|| AppError::InvalidCommand {
            reason: format!("{command} expects <width> <height> in pixels"),
            location: ErrorLocation::from(Location::caller()),
        })
}
