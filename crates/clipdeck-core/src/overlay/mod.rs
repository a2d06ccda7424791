//! Timestamp overlay drawn on top of the playback surface.

mod surface;
mod timestamp;

pub use {
    surface::{OverlaySurface, TextAlign, TextBaseline, TextStyle},
    timestamp::{OverlaySettings, TimestampOverlay},
};
