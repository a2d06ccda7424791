use clipdeck_core::{
    View, ViewState,
    notify::Severity,
    overlay::{OverlaySurface, TextStyle},
    playback::ButtonLook,
};

use tracing::{debug, error, info, warn};

/// [`View`] that logs what changed since the last render.
#[derive(Debug, Default)]
pub struct TerminalView {
    last: Option<ViewState>,
}

impl TerminalView {
    /// Create a view with nothing rendered yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for TerminalView {
    fn render(&mut self, state: &ViewState) {
        let previous = self.last.as_ref();

        if previous.map(|p| &p.notification) != Some(&state.notification)
            && let Some(notification) = &state.notification
        {
            match notification.severity {
                Severity::Info | Severity::Success => info!("{}", notification.message),
                Severity::Warning => warn!("{}", notification.message),
                Severity::Error => error!("{}", notification.message),
            }
        }

        if previous.map(|p| &p.controls) != Some(&state.controls) {
            debug!(controls = ?state.controls, "Controls updated");
        }

        if previous.map(|p| p.recording_indicator) != Some(state.recording_indicator) {
            info!(recording = state.recording_indicator, "Recording indicator");
        }

        if previous.map(|p| &p.transport) != Some(&state.transport) {
            let transport = &state.transport;
            let button = match transport.button {
                ButtonLook::Paused => "play",
                ButtonLook::Playing => "pause",
            };
            debug!(
                elapsed = %transport.elapsed,
                duration = %transport.duration,
                progress = transport.progress_percent,
                volume = transport.volume,
                muted = transport.muted,
                button,
                "Transport"
            );
        }

        if previous.map(|p| (&p.music, &p.music_track)) != Some((&state.music, &state.music_track)) {
            info!(music = ?state.music, track = ?state.music_track, "Music");
        }

        self.last = Some(state.clone());
    }
}

/// [`OverlaySurface`] that logs drawn text.
#[derive(Debug, Default)]
pub struct TerminalOverlay {
    visible: bool,
    size: (u32, u32),
}

impl TerminalOverlay {
    /// Create a hidden overlay.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlaySurface for TerminalOverlay {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        debug!(visible, "Overlay visibility");
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn configure(&mut self, style: &TextStyle) {
        debug!(font = %style.font, fill = %style.fill, "Overlay style");
    }

    fn clear(&mut self) {}

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if self.visible {
            debug!(x, y, width = self.size.0, "Overlay: {}", text);
        }
    }
}
