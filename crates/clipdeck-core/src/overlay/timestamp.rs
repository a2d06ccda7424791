use crate::{
    overlay::{OverlaySurface, TextStyle},
    playback::{PlaybackSnapshot, format_timestamp},
    timer::{Scheduler, TimerId, TimerTag},
};

use std::time::Duration;

use tracing::{debug, instrument, trace};

/// Overlay tuning knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    /// Redraw cadence while content advances.
    pub refresh_interval: Duration,
    /// Text style applied on every resize.
    pub style: TextStyle,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(100),
            style: TextStyle::default(),
        }
    }
}

/// Periodically renders the elapsed time while playback advances.
///
/// The refresh timer runs only while the overlay is visible and playback is
/// active; a paused or ended clip leaves the overlay blank.
pub struct TimestampOverlay {
    surface: Box<dyn OverlaySurface>,
    visible: bool,
    refresh: Option<TimerId>,
    size: (u32, u32),
    settings: OverlaySettings,
}

impl TimestampOverlay {
    /// Create a hidden overlay.
    pub fn new(mut surface: Box<dyn OverlaySurface>, settings: OverlaySettings) -> Self {
        surface.set_visible(false);
        Self {
            surface,
            visible: false,
            refresh: None,
            size: (0, 0),
            settings,
        }
    }

    /// Flip visibility. Returns the new state.
    #[instrument(skip(self, scheduler))]
    pub fn toggle(
        &mut self,
        scheduler: &mut dyn Scheduler,
        size: (u32, u32),
        playback_active: bool,
    ) -> bool {
        self.visible = !self.visible;

        if self.visible {
            self.surface.set_visible(true);
            self.sync_size(size);
            self.surface.clear();
            if playback_active {
                self.start_refresh(scheduler);
            }
        } else {
            self.stop_refresh(scheduler);
            self.surface.clear();
            self.surface.set_visible(false);
        }

        debug!(visible = self.visible, "Timestamp overlay toggled");
        self.visible
    }

    /// Follow playback starting or stopping.
    pub fn on_playback_changed(&mut self, scheduler: &mut dyn Scheduler, active: bool) {
        if active {
            if self.visible && self.refresh.is_none() {
                self.start_refresh(scheduler);
            }
        } else if self.refresh.is_some() {
            self.stop_refresh(scheduler);
            self.surface.clear();
        }
    }

    /// Redraw from a playback snapshot. Returns the drawn text, if any.
    pub fn redraw(&mut self, playback: &PlaybackSnapshot) -> Option<String> {
        self.surface.clear();

        if !self.visible || !playback.is_advancing() {
            return None;
        }

        let text = format_timestamp(playback.current_time);
        let margin = self.settings.style.margin;
        self.surface
            .fill_text(&text, f64::from(self.size.0) - margin, margin);

        trace!(text = %text, "Timestamp drawn");
        Some(text)
    }

    /// Follow a viewport resize. Ignored while hidden.
    pub fn on_viewport_resized(&mut self, size: (u32, u32)) {
        if self.visible {
            self.sync_size(size);
        }
    }

    /// Cancel the refresh timer and clear the layer.
    pub fn shutdown(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop_refresh(scheduler);
        self.surface.clear();
    }

    /// Whether the overlay is toggled on.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the refresh timer is running.
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    /// Last size the layer was matched to.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn sync_size(&mut self, (width, height): (u32, u32)) {
        self.size = (width, height);
        self.surface.resize(width, height);
        // Resizing resets the drawing state, so the style is re-applied.
        self.surface.configure(&self.settings.style);
        debug!(width, height, "Overlay resized");
    }

    fn start_refresh(&mut self, scheduler: &mut dyn Scheduler) {
        self.refresh = Some(scheduler.every(self.settings.refresh_interval, TimerTag::OverlayRefresh));
    }

    fn stop_refresh(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.refresh.take() {
            scheduler.cancel(timer);
        }
    }
}
