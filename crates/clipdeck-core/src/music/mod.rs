//! Optional background music slaved to the playback volume.

mod mixer;
mod track;

pub use {
    mixer::{DEFAULT_VOLUME_RATIO, MusicMixer, MusicState},
    track::{AudioTrack, MediaFile, MusicEvent},
};
