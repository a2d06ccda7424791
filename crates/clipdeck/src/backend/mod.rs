//! Desktop implementations of the studio's platform seams.

mod file_export;
mod microphone;
mod music_track;
mod terminal;
mod transport;

pub(crate) use {
    file_export::FileExporter,
    microphone::MicrophoneCapture,
    music_track::{HeadlessTrack, read_media_file},
    terminal::{TerminalOverlay, TerminalView},
    transport::{HeadlessPlayer, Viewport},
};

#[cfg(test)]
pub(crate) use {
    microphone::{encode_l16, pcm_mime_type},
    music_track::mime_type_for,
    transport::pcm_duration,
};
