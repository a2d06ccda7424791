//! Transport control of the recorded clip.

mod controller;
mod format;
mod surface;

pub use {
    controller::{
        ButtonLook, PlaybackController, PlaybackPhase, PlaybackSettings, PlaybackSnapshot,
        TransportDisplay,
    },
    format::{format_time, format_timestamp},
    surface::{FULLSCREEN_FALLBACKS, FullscreenApi, PlaybackEvent, PlaybackSurface},
};
