use crate::{
    CoreResult, StudioError,
    clip::{ClipHandle, ClipRegistry},
    music::{AudioTrack, MediaFile},
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Music volume relative to the playback volume.
pub const DEFAULT_VOLUME_RATIO: f64 = 0.5;

/// Play state of the music track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    /// Paused or never started.
    Stopped,
    /// Play requested, waiting for the platform.
    Starting,
    /// Playing.
    Playing,
}

struct LoadedTrack {
    name: String,
    clip: ClipHandle,
}

/// Loads and plays one background track at a time.
///
/// The track volume is never set directly; it is always
/// `playback volume * ratio`.
pub struct MusicMixer {
    track: Box<dyn AudioTrack>,
    loaded: Option<LoadedTrack>,
    state: MusicState,
    volume: f64,
    ratio: f64,
}

impl MusicMixer {
    /// Create an empty mixer and derive its volume from `main_volume`.
    pub fn new(track: Box<dyn AudioTrack>, ratio: f64, main_volume: f64) -> Self {
        let mut mixer = Self {
            track,
            loaded: None,
            state: MusicState::Stopped,
            volume: 0.0,
            ratio,
        };
        mixer.sync_volume(main_volume);
        mixer
    }

    /// Load a user file as the background track.
    ///
    /// Non-audio files are rejected and leave the current track untouched.
    #[track_caller]
    #[instrument(skip(self, registry, file), fields(name = %file.name, mime_type = %file.mime_type))]
    pub fn load_track(
        &mut self,
        registry: &Arc<ClipRegistry>,
        file: MediaFile,
        main_volume: f64,
    ) -> CoreResult<()> {
        if !file.is_audio() {
            warn!("Rejected non-audio music file");
            return Err(StudioError::InvalidMediaType {
                mime_type: file.mime_type,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Release the previous reference before minting the next one.
        if let Some(previous) = self.loaded.take() {
            self.track.pause();
            debug!(url = previous.clip.url(), "Previous music track released");
        }

        let clip = registry.mint(file.to_clip());
        self.track.load(&clip);
        self.track.pause();
        self.state = MusicState::Stopped;
        self.sync_volume(main_volume);

        info!(url = clip.url(), byte_len = clip.clip().len(), "Music track loaded");

        self.loaded = Some(LoadedTrack {
            name: file.name,
            clip,
        });

        Ok(())
    }

    /// Start or pause the track.
    ///
    /// Starting completes asynchronously via [`MusicMixer::on_started`] or
    /// [`MusicMixer::on_failed`].
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle(&mut self) -> CoreResult<MusicState> {
        if self.loaded.is_none() {
            return Err(StudioError::NoTrackLoaded {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self.state {
            MusicState::Stopped => {
                self.track.play();
                self.state = MusicState::Starting;
                debug!("Music play requested");
            }
            MusicState::Starting | MusicState::Playing => {
                self.track.pause();
                self.state = MusicState::Stopped;
                debug!("Music paused");
            }
        }

        Ok(self.state)
    }

    /// The platform started the track. Returns `true` if the mixer was
    /// waiting for it.
    pub fn on_started(&mut self) -> bool {
        if self.state != MusicState::Starting {
            debug!(state = ?self.state, "Late music start ignored");
            return false;
        }
        self.state = MusicState::Playing;
        info!("Music playing");
        true
    }

    /// The platform rejected playback; the mixer stays stopped.
    #[track_caller]
    pub fn on_failed(&mut self, reason: String) -> CoreResult<()> {
        let was_starting = self.state == MusicState::Starting;
        self.state = MusicState::Stopped;

        if !was_starting {
            debug!(reason = %reason, "Late music failure ignored");
            return Ok(());
        }

        Err(StudioError::PlaybackStartFailure {
            reason,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Recompute the track volume from the playback volume.
    pub fn sync_volume(&mut self, main_volume: f64) {
        self.volume = (main_volume * self.ratio).clamp(0.0, 1.0);
        self.track.set_volume(self.volume);
        debug!(main_volume, music_volume = self.volume, "Music volume synced");
    }

    /// Pause and release the track.
    pub fn shutdown(&mut self) {
        if self.loaded.take().is_some() {
            self.track.pause();
        }
        self.state = MusicState::Stopped;
    }

    /// Current music volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Current play state.
    pub fn state(&self) -> MusicState {
        self.state
    }

    /// Whether a track is loaded.
    pub fn has_track(&self) -> bool {
        self.loaded.is_some()
    }

    /// Name of the loaded track.
    pub fn track_name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|track| track.name.as_str())
    }
}
