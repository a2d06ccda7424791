//! Clipdeck Core Library
//!
//! Headless recorder and player: capture sessions, clip playback, a
//! timestamp overlay, background music and transient notifications, driven
//! one event at a time by a [`Studio`].
//!
//! Platform capabilities (capture device, playback element, overlay layer,
//! audio track, file export, view, timers) are traits supplied by the host.
//!
//! # Example
//!
//! ```no_run
//! use clipdeck_core::{
//!     Platform, Studio, StudioEvent, StudioSettings, UserAction, clip::ClipRegistry,
//! };
//!
//! fn run(platform: Platform, events: Vec<StudioEvent>) {
//!     let mut studio = Studio::new(platform, StudioSettings::default(), ClipRegistry::new());
//!
//!     studio.handle(StudioEvent::User(UserAction::StartCapture));
//!     for event in events {
//!         if !studio.handle(event) {
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod capture;
pub mod clip;
mod error;
pub mod export;
pub mod music;
pub mod notify;
pub mod overlay;
pub mod playback;
mod studio;
pub mod timer;

pub use {
    error::Result as CoreResult,
    error::StudioError,
    studio::{
        ControlPhase, Controls, EventSender, Platform, Studio, StudioEvent, StudioSettings,
        UserAction, View, ViewState,
    },
};

#[cfg(test)]
mod tests;
