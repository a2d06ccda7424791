use crate::{AppError, AppResult};

use clipdeck_core::{
    EventSender, StudioEvent,
    clip::ClipHandle,
    music::{AudioTrack, MediaFile, MusicEvent},
};

use std::{fs, panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Media type declared for a file, guessed from its extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Read a file picked on the console into a [`MediaFile`].
#[track_caller]
#[instrument]
pub fn read_media_file(path: &Path) -> AppResult<MediaFile> {
    let bytes = fs::read(path)?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::InvalidCommand {
            reason: format!("{} is not a file", path.display()),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let mime_type = mime_type_for(path);
    debug!(name = %name, mime_type, byte_len = bytes.len(), "Media file read");

    Ok(MediaFile::new(name, mime_type, bytes))
}

/// [`AudioTrack`] that follows play state without producing sound.
pub struct HeadlessTrack {
    events: EventSender,
    source: Option<(String, usize)>,
    playing: bool,
    volume: f64,
}

impl HeadlessTrack {
    /// Create an empty track.
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            source: None,
            playing: false,
            volume: 1.0,
        }
    }

    fn emit(&self, event: MusicEvent) {
        if self.events.send(StudioEvent::Music(event)).is_err() {
            debug!("Studio gone, music event dropped");
        }
    }
}

impl AudioTrack for HeadlessTrack {
    fn load(&mut self, clip: &ClipHandle) {
        self.source = Some((clip.url().to_string(), clip.clip().len()));
        self.playing = false;
        debug!(url = clip.url(), "Music source bound");
    }

    fn play(&mut self) {
        match &self.source {
            Some((url, len)) if *len > 0 => {
                self.playing = true;
                info!(url = %url, volume = self.volume, "Music playing");
                self.emit(MusicEvent::Started);
            }
            Some(_) => self.emit(MusicEvent::Failed {
                reason: "empty media".to_string(),
            }),
            None => self.emit(MusicEvent::Failed {
                reason: "no source".to_string(),
            }),
        }
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            debug!("Music paused");
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}
