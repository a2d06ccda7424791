use crate::{
    CoreResult, StudioError,
    clip::ClipHandle,
    playback::{FULLSCREEN_FALLBACKS, PlaybackSurface, format_time},
    timer::{Scheduler, TimerId, TimerTag},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Transport tuning knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// Seconds moved by rewind/forward.
    pub seek_step_secs: f64,
    /// Volume applied at startup.
    pub initial_volume: f64,
    /// Volume restored by unmute when the last volume was 0.
    pub unmute_fallback_volume: f64,
    /// How often an unknown duration is re-checked.
    pub duration_poll_interval: Duration,
    /// Re-checks before giving up on an unknown duration.
    pub duration_poll_max_attempts: u32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            initial_volume: 1.0,
            unmute_fallback_volume: 0.5,
            duration_poll_interval: Duration::from_millis(200),
            duration_poll_max_attempts: 150,
        }
    }
}

/// Transport phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No clip bound.
    Idle,
    /// Clip bound, paused.
    Paused,
    /// Clip bound, playing.
    Playing,
    /// Playback reached the end.
    Ended,
}

/// Look of the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLook {
    /// Shows the "play" affordance.
    Paused,
    /// Shows the "pause" affordance.
    Playing,
}

/// What the transport controls show.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportDisplay {
    /// Progress bar value in `[0, 100]`.
    pub progress_percent: f64,
    /// Elapsed time label.
    pub elapsed: String,
    /// Duration label.
    pub duration: String,
    /// Play/pause button look.
    pub button: ButtonLook,
    /// Volume slider value in `[0, 1]`.
    pub volume: f64,
    /// Whether the mute icon is shown.
    pub muted: bool,
}

impl TransportDisplay {
    fn reset(volume: f64) -> Self {
        Self {
            progress_percent: 0.0,
            elapsed: format_time(0.0),
            duration: format_time(0.0),
            button: ButtonLook::Paused,
            volume,
            muted: volume == 0.0,
        }
    }
}

/// Point-in-time view of the playback state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    /// Current position in seconds.
    pub current_time: f64,
    /// Duration in seconds, possibly non-finite.
    pub duration: f64,
    /// Whether playback is paused.
    pub paused: bool,
    /// Whether playback reached the end.
    pub ended: bool,
}

impl PlaybackSnapshot {
    /// Whether content is actively advancing.
    pub fn is_advancing(&self) -> bool {
        !self.paused && !self.ended
    }
}

#[derive(Debug, Clone, Copy)]
struct DurationPoll {
    timer: TimerId,
    attempts: u32,
}

/// Drives the playback surface and mirrors its state into the transport
/// display.
pub struct PlaybackController {
    surface: Box<dyn PlaybackSurface>,
    clip: Option<ClipHandle>,
    phase: PlaybackPhase,
    display: TransportDisplay,
    volume: f64,
    last_volume: f64,
    duration_poll: Option<DurationPoll>,
    settings: PlaybackSettings,
}

impl PlaybackController {
    /// Create an idle controller and apply the initial volume.
    pub fn new(mut surface: Box<dyn PlaybackSurface>, settings: PlaybackSettings) -> Self {
        let volume = settings.initial_volume.clamp(0.0, 1.0);
        surface.set_volume(volume);

        Self {
            surface,
            clip: None,
            phase: PlaybackPhase::Idle,
            display: TransportDisplay::reset(volume),
            volume,
            last_volume: volume,
            duration_poll: None,
            settings,
        }
    }

    /// Unbind the current clip and release its reference.
    #[instrument(skip(self, scheduler))]
    pub fn eject(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop_duration_poll(scheduler);

        if let Some(clip) = self.clip.take() {
            self.surface.unload();
            debug!(url = clip.url(), "Playback clip ejected");
        }

        self.phase = PlaybackPhase::Idle;
        self.display = TransportDisplay::reset(self.volume);
    }

    /// Bind a clip. Any previous clip is ejected first.
    #[instrument(skip(self, scheduler))]
    pub fn load(&mut self, scheduler: &mut dyn Scheduler, clip: ClipHandle) {
        self.eject(scheduler);

        self.surface.load(&clip);
        info!(url = clip.url(), byte_len = clip.clip().len(), "Playback clip loaded");

        self.clip = Some(clip);
        self.phase = PlaybackPhase::Paused;
    }

    /// Handle metadata availability; polls when the duration is not yet finite.
    #[instrument(skip(self, scheduler))]
    pub fn on_metadata(&mut self, scheduler: &mut dyn Scheduler) {
        if self.clip.is_none() {
            return;
        }

        self.display.progress_percent = 0.0;

        let duration = self.surface.duration();
        if duration.is_finite() {
            self.display.duration = format_time(duration);
            debug!(duration, "Duration known at metadata");
            return;
        }

        self.display.duration = format_time(0.0);
        if self.duration_poll.is_none() {
            let timer = scheduler.every(
                self.settings.duration_poll_interval,
                TimerTag::DurationPoll,
            );
            self.duration_poll = Some(DurationPoll { timer, attempts: 0 });
            debug!(%timer, "Duration unknown, polling");
        }
    }

    /// Re-check the duration. Returns `true` once it resolved.
    #[instrument(skip(self, scheduler))]
    pub fn on_duration_poll(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        let Some(mut poll) = self.duration_poll else {
            return false;
        };

        let duration = self.surface.duration();
        if duration.is_finite() && duration > 0.0 {
            self.display.duration = format_time(duration);
            self.stop_duration_poll(scheduler);
            info!(duration, attempts = poll.attempts + 1, "Duration resolved");
            return true;
        }

        poll.attempts += 1;
        if poll.attempts >= self.settings.duration_poll_max_attempts {
            warn!(attempts = poll.attempts, "Duration never resolved, giving up");
            self.stop_duration_poll(scheduler);
        } else {
            self.duration_poll = Some(poll);
        }

        false
    }

    /// Play when paused or ended, otherwise pause.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle_play_pause(&mut self) -> CoreResult<()> {
        self.require_clip()?;

        if self.surface.is_paused() || self.surface.is_ended() {
            self.surface.play();
            debug!("Play requested");
        } else {
            self.surface.pause();
            debug!("Pause requested");
        }

        Ok(())
    }

    /// Surface started playing.
    pub fn on_playing(&mut self) {
        if self.clip.is_some() {
            self.phase = PlaybackPhase::Playing;
            self.display.button = ButtonLook::Playing;
        }
    }

    /// Surface paused.
    pub fn on_paused(&mut self) {
        if self.clip.is_some() && self.phase != PlaybackPhase::Ended {
            self.phase = PlaybackPhase::Paused;
        }
        self.display.button = ButtonLook::Paused;
    }

    /// Surface reached the end. Only the display is reset; the position is
    /// left to the platform.
    pub fn on_ended(&mut self) {
        if self.clip.is_none() {
            return;
        }
        self.phase = PlaybackPhase::Ended;
        self.display.button = ButtonLook::Paused;
        self.display.progress_percent = 0.0;
        self.display.elapsed = format_time(0.0);
    }

    /// Surface advanced its current time.
    pub fn on_time_update(&mut self) {
        if self.clip.is_none() {
            return;
        }

        let current = self.surface.current_time();
        let duration = self.surface.duration();

        self.display.progress_percent = if duration.is_finite() && duration > 0.0 {
            (current / duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.display.elapsed = format_time(current);
    }

    /// Seek to `fraction` of the duration, clamped to `[0, 1]`.
    ///
    /// Returns the new position.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn seek(&mut self, fraction: f64) -> CoreResult<f64> {
        self.require_clip()?;

        let duration = self.surface.duration();
        if !duration.is_finite() || fraction.is_nan() {
            debug!(duration, "Seek ignored, duration unknown");
            return Ok(self.surface.current_time());
        }

        let target = fraction.clamp(0.0, 1.0) * duration;
        self.surface.set_current_time(target);
        debug!(target, "Seeked");

        Ok(target)
    }

    /// Move back one seek step, never below zero.
    #[track_caller]
    pub fn rewind(&mut self) -> CoreResult<f64> {
        self.step(-self.settings.seek_step_secs)
    }

    /// Move forward one seek step, never past the duration.
    #[track_caller]
    pub fn forward(&mut self) -> CoreResult<f64> {
        self.step(self.settings.seek_step_secs)
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn step(&mut self, delta: f64) -> CoreResult<f64> {
        self.require_clip()?;

        let duration = self.surface.duration();
        let mut target = (self.surface.current_time() + delta).max(0.0);
        if duration.is_finite() {
            target = target.min(duration.max(0.0));
        }

        self.surface.set_current_time(target);
        debug!(target, "Stepped");

        Ok(target)
    }

    /// Set the playback volume, clamped to `[0, 1]`. Returns the applied value.
    #[instrument(skip(self))]
    pub fn set_volume(&mut self, volume: f64) -> f64 {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };

        self.last_volume = volume;
        self.apply_volume(volume);

        debug!(volume, "Volume set");
        volume
    }

    /// Mute, or restore the last volume. Returns the applied value.
    ///
    /// A last volume of 0 unmutes to the fallback volume instead.
    #[instrument(skip(self))]
    pub fn toggle_mute(&mut self) -> f64 {
        let volume = if self.volume == 0.0 {
            if self.last_volume > 0.0 {
                self.last_volume
            } else {
                self.settings.unmute_fallback_volume
            }
        } else {
            self.last_volume = self.volume;
            0.0
        };

        self.apply_volume(volume);

        debug!(volume, "Mute toggled");
        volume
    }

    /// Request full-screen presentation, trying each capability in turn.
    ///
    /// Returns `false` when no capability is supported.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn fullscreen(&mut self) -> CoreResult<bool> {
        self.require_clip()?;

        for api in FULLSCREEN_FALLBACKS {
            if self.surface.request_fullscreen(api) {
                debug!(?api, "Fullscreen requested");
                return Ok(true);
            }
        }

        debug!("Fullscreen unsupported");
        Ok(false)
    }

    /// Point-in-time view of the surface.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_time: self.surface.current_time(),
            duration: self.surface.duration(),
            paused: self.surface.is_paused(),
            ended: self.surface.is_ended(),
        }
    }

    /// Whether content is actively advancing.
    pub fn is_active(&self) -> bool {
        self.clip.is_some() && self.phase == PlaybackPhase::Playing
    }

    /// Current transport phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// What the transport controls show.
    pub fn display(&self) -> &TransportDisplay {
        &self.display
    }

    /// Current playback volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Last volume set by the slider or before muting.
    pub fn last_volume(&self) -> f64 {
        self.last_volume
    }

    /// The bound clip, if any.
    pub fn clip(&self) -> Option<&ClipHandle> {
        self.clip.as_ref()
    }

    /// Whether a duration poll is running.
    pub fn is_polling_duration(&self) -> bool {
        self.duration_poll.is_some()
    }

    /// Displayed size of the surface.
    pub fn display_size(&self) -> (u32, u32) {
        self.surface.display_size()
    }

    fn apply_volume(&mut self, volume: f64) {
        self.volume = volume;
        self.surface.set_volume(volume);
        self.display.volume = volume;
        self.display.muted = volume == 0.0;
    }

    fn stop_duration_poll(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(poll) = self.duration_poll.take() {
            scheduler.cancel(poll.timer);
        }
    }

    #[track_caller]
    fn require_clip(&self) -> CoreResult<()> {
        if self.clip.is_none() {
            return Err(StudioError::NoClipLoaded {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}
