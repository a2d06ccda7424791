use crate::clip::{Clip, ClipHandle};

use std::sync::Arc;

/// A user-supplied file with its declared media type.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// File name shown to the user.
    pub name: String,
    /// Declared media type, e.g. `audio/mpeg`.
    pub mime_type: String,
    /// File contents.
    pub bytes: Arc<[u8]>,
}

impl MediaFile {
    /// Create a file from its parts.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the declared type belongs to the audio category.
    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }

    pub(crate) fn to_clip(&self) -> Clip {
        Clip::new(Arc::clone(&self.bytes), self.mime_type.clone())
    }
}

/// Answers to an asynchronous play request on the music track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicEvent {
    /// The track started playing.
    Started,
    /// The platform rejected playback (e.g. a decoding error).
    Failed {
        /// Reason reported by the platform.
        reason: String,
    },
}

/// Independent audio element used for background music.
pub trait AudioTrack: Send {
    /// Bind a source and reset to paused, ready to play.
    fn load(&mut self, clip: &ClipHandle);

    /// Begin playback. Answered by a [`MusicEvent`].
    fn play(&mut self);

    /// Pause playback.
    fn pause(&mut self);

    /// Apply a volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
}
