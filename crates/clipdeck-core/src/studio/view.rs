use crate::{
    music::MusicState, notify::Notification, playback::TransportDisplay, studio::Controls,
};

/// Everything the UI shows, derived after each event.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Enabled flags of the controls.
    pub controls: Controls,
    /// Transport labels, progress and volume.
    pub transport: TransportDisplay,
    /// "Recording active" indicator.
    pub recording_indicator: bool,
    /// Whether the custom playback controls overlay is shown.
    pub controls_overlay: bool,
    /// Whether the timestamp overlay is toggled on.
    pub timestamp_visible: bool,
    /// Music play state.
    pub music: MusicState,
    /// Name of the loaded music file.
    pub music_track: Option<String>,
    /// Displayed notification.
    pub notification: Option<Notification>,
}

/// UI surface receiving view updates.
pub trait View: Send {
    /// Present a new view state. Only called when it changed.
    fn render(&mut self, state: &ViewState);
}
