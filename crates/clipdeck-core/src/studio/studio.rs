use crate::{
    CoreResult, StudioError,
    capture::{CaptureDevice, CaptureEvent, CaptureSession, CaptureState, StopOutcome},
    clip::ClipRegistry,
    export::{ClipExporter, RecordingFormat, export_file_name},
    music::{AudioTrack, MediaFile, MusicEvent, MusicMixer, MusicState},
    notify::{Notifier, Severity},
    overlay::{OverlaySurface, TimestampOverlay},
    playback::{PlaybackController, PlaybackEvent, PlaybackSurface},
    studio::{ControlPhase, Controls, StudioEvent, StudioSettings, UserAction, View, ViewState},
    timer::{Scheduler, TimerTag},
};

use std::{panic::Location, sync::Arc};

use chrono::Utc;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Platform capabilities the studio drives.
pub struct Platform {
    /// Camera/microphone capture with its encoder.
    pub capture: Box<dyn CaptureDevice>,
    /// Playback element for recorded clips.
    pub playback: Box<dyn PlaybackSurface>,
    /// Layer drawn over the playback element.
    pub overlay: Box<dyn OverlaySurface>,
    /// Audio element for background music.
    pub music: Box<dyn AudioTrack>,
    /// "Save as file" action.
    pub exporter: Box<dyn ClipExporter>,
    /// UI surface.
    pub view: Box<dyn View>,
    /// Timer source feeding back into the event loop.
    pub scheduler: Box<dyn Scheduler>,
}

/// Recorder and player session.
///
/// Owns every component and processes one [`StudioEvent`] at a time. Errors
/// raised by an event are turned into notifications; none escapes
/// [`Studio::handle`].
pub struct Studio {
    registry: Arc<ClipRegistry>,
    capture: CaptureSession,
    playback: PlaybackController,
    overlay: TimestampOverlay,
    music: MusicMixer,
    notifier: Notifier,
    exporter: Box<dyn ClipExporter>,
    view: Box<dyn View>,
    scheduler: Box<dyn Scheduler>,
    format: RecordingFormat,
    seek_step_secs: f64,
    last_view: Option<ViewState>,
    closed: bool,
}

impl Studio {
    /// Assemble a studio and render its initial view.
    #[instrument(skip_all)]
    pub fn new(platform: Platform, settings: StudioSettings, registry: Arc<ClipRegistry>) -> Self {
        let Platform {
            capture,
            playback,
            overlay,
            music,
            exporter,
            view,
            scheduler,
        } = platform;

        let seek_step_secs = settings.playback.seek_step_secs;
        let playback = PlaybackController::new(playback, settings.playback);
        let music = MusicMixer::new(music, settings.music_volume_ratio, playback.volume());

        let mut studio = Self {
            registry,
            capture: CaptureSession::new(capture, settings.format.mime_type.clone()),
            playback,
            overlay: TimestampOverlay::new(overlay, settings.overlay),
            music,
            notifier: Notifier::new(settings.notification_dismiss_after),
            exporter,
            view,
            scheduler,
            format: settings.format,
            seek_step_secs,
            last_view: None,
            closed: false,
        };

        studio.render();
        info!("Studio ready");

        studio
    }

    /// Process one event to completion.
    ///
    /// Returns `false` once the studio has been unloaded.
    pub fn handle(&mut self, event: StudioEvent) -> bool {
        if self.closed {
            debug!(?event, "Event after unload ignored");
            return false;
        }

        if let Err(e) = self.dispatch(event) {
            warn!(error = ?e, "Action failed");
            let (message, severity) = e.user_message();
            self.notify(message, severity);
        }

        self.render();
        !self.closed
    }

    fn dispatch(&mut self, event: StudioEvent) -> CoreResult<()> {
        match event {
            StudioEvent::User(action) => self.on_user(action),
            StudioEvent::Capture(event) => self.on_capture(event),
            StudioEvent::Playback(event) => {
                self.on_playback(event);
                Ok(())
            }
            StudioEvent::Music(event) => self.on_music(event),
            StudioEvent::Timer(tag) => {
                self.on_timer(tag);
                Ok(())
            }
            StudioEvent::ViewportResized => {
                self.overlay
                    .on_viewport_resized(self.playback.display_size());
                Ok(())
            }
            StudioEvent::Unload => {
                self.unload();
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    fn on_user(&mut self, action: UserAction) -> CoreResult<()> {
        let controls = Controls::for_phase(self.control_phase(), self.music.has_track());
        if !controls.allows(&action) {
            return self.refuse(&action);
        }

        match action {
            UserAction::StartCapture => self.start_capture(),
            UserAction::StopCapture => {
                if self.capture.stop()? == StopOutcome::Idle {
                    debug!("Stop with no active capture");
                }
            }
            UserAction::TogglePlayPause => self.playback.toggle_play_pause()?,
            UserAction::Rewind => {
                self.playback.rewind()?;
                self.notify(
                    format!("Rewound {} seconds", self.seek_step_secs),
                    Severity::Info,
                );
            }
            UserAction::Forward => {
                self.playback.forward()?;
                self.notify(
                    format!("Forwarded {} seconds", self.seek_step_secs),
                    Severity::Info,
                );
            }
            UserAction::Seek(fraction) => {
                self.playback.seek(fraction)?;
            }
            UserAction::SetVolume(volume) => {
                let volume = self.playback.set_volume(volume);
                self.music.sync_volume(volume);
            }
            UserAction::ToggleMute => {
                let volume = self.playback.toggle_mute();
                self.music.sync_volume(volume);
            }
            UserAction::Fullscreen => {
                self.playback.fullscreen()?;
            }
            UserAction::Download => self.download()?,
            UserAction::ToggleTimestamp => self.toggle_timestamp()?,
            UserAction::ChooseMusic(file) => self.choose_music(file)?,
            UserAction::MusicUnreadable { name, reason } => {
                return Err(StudioError::MediaReadFailed {
                    name,
                    reason,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            UserAction::ToggleMusic => {
                if self.music.toggle()? == MusicState::Stopped {
                    self.notify("Background music stopped.", Severity::Info);
                }
            }
        }

        Ok(())
    }

    fn start_capture(&mut self) {
        if self.capture.state() != CaptureState::Idle {
            debug!("Capture already active");
            return;
        }

        // A new capture discards the previous clip and its reference.
        self.overlay
            .on_playback_changed(self.scheduler.as_mut(), false);
        self.playback.eject(self.scheduler.as_mut());
        self.capture.start();
    }

    #[instrument(skip(self))]
    fn on_capture(&mut self, event: CaptureEvent) -> CoreResult<()> {
        match event {
            CaptureEvent::Granted { request, stream } => {
                if self.capture.on_granted(request, stream)? {
                    self.notify("Recording started...", Severity::Success);
                }
            }
            CaptureEvent::Denied { request, reason } => {
                self.capture.on_denied(request, reason)?;
            }
            CaptureEvent::ChunkReady { stream, data } => {
                self.capture.on_chunk(stream, data);
            }
            CaptureEvent::Finalized { stream } => {
                if let Some(clip) = self.capture.on_finalized(stream) {
                    // Release the previous reference before minting the next one.
                    self.playback.eject(self.scheduler.as_mut());
                    let handle = self.registry.mint(clip);
                    self.playback.load(self.scheduler.as_mut(), handle);
                    self.notify("Recording stopped and ready for playback!", Severity::Success);
                }
            }
        }

        Ok(())
    }

    fn on_playback(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::MetadataLoaded => self.playback.on_metadata(self.scheduler.as_mut()),
            PlaybackEvent::TimeUpdate => self.playback.on_time_update(),
            PlaybackEvent::Playing => self.playback.on_playing(),
            PlaybackEvent::Paused => self.playback.on_paused(),
            PlaybackEvent::Ended => self.playback.on_ended(),
        }

        if matches!(
            event,
            PlaybackEvent::Playing | PlaybackEvent::Paused | PlaybackEvent::Ended
        ) {
            let active = self.playback.is_active();
            self.overlay
                .on_playback_changed(self.scheduler.as_mut(), active);
        }
    }

    fn on_music(&mut self, event: MusicEvent) -> CoreResult<()> {
        match event {
            MusicEvent::Started => {
                if self.music.on_started() {
                    self.notify("Background music playing.", Severity::Info);
                }
            }
            MusicEvent::Failed { reason } => self.music.on_failed(reason)?,
        }
        Ok(())
    }

    fn on_timer(&mut self, tag: TimerTag) {
        match tag {
            TimerTag::OverlayRefresh => {
                let snapshot = self.playback.snapshot();
                self.overlay.redraw(&snapshot);
            }
            TimerTag::DurationPoll => {
                self.playback.on_duration_poll(self.scheduler.as_mut());
            }
            TimerTag::DismissNotification { seq } => {
                self.notifier.on_dismiss(seq);
            }
        }
    }

    /// Reject an action whose control is disabled.
    ///
    /// Actions that need something not there yet say what is missing;
    /// the rest are dropped.
    #[track_caller]
    fn refuse(&self, action: &UserAction) -> CoreResult<()> {
        let location = ErrorLocation::from(Location::caller());
        match action {
            UserAction::Download => Err(StudioError::NoRecordingAvailable { location }),
            UserAction::ToggleMusic if !self.music.has_track() => {
                Err(StudioError::NoTrackLoaded { location })
            }
            UserAction::TogglePlayPause
            | UserAction::Rewind
            | UserAction::Forward
            | UserAction::Seek(_)
            | UserAction::Fullscreen
            | UserAction::ToggleTimestamp
                if self.playback.clip().is_none() =>
            {
                Err(StudioError::NoClipLoaded { location })
            }
            _ => {
                debug!(?action, phase = ?self.control_phase(), "Action ignored, control disabled");
                Ok(())
            }
        }
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn download(&mut self) -> CoreResult<()> {
        let recording = self.capture.recording();
        if recording.chunk_count() == 0 {
            return Err(StudioError::NoRecordingAvailable {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let clip = recording.to_clip(self.capture.mime_type());
        let file_name = export_file_name(&self.format.file_prefix, Utc::now(), &self.format.extension);

        // The reference lives only for the duration of the save.
        let handle = self.registry.mint(clip);
        self.exporter.save(&file_name, &handle)?;
        drop(handle);

        info!(file_name = %file_name, "Recording downloaded");
        self.notify("Recording downloaded!", Severity::Success);

        Ok(())
    }

    #[track_caller]
    fn toggle_timestamp(&mut self) -> CoreResult<()> {
        if self.playback.clip().is_none() {
            return Err(StudioError::NoClipLoaded {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let visible = self.overlay.toggle(
            self.scheduler.as_mut(),
            self.playback.display_size(),
            self.playback.is_active(),
        );

        let message = if visible {
            "Timestamp overlay enabled."
        } else {
            "Timestamp overlay disabled."
        };
        self.notify(message, Severity::Info);

        Ok(())
    }

    fn choose_music(&mut self, file: Option<MediaFile>) -> CoreResult<()> {
        let Some(file) = file else {
            self.notify("No music file selected.", Severity::Warning);
            return Ok(());
        };

        let name = file.name.clone();
        self.music
            .load_track(&self.registry, file, self.playback.volume())?;
        self.notify(format!("Music file \"{name}\" loaded!"), Severity::Success);

        Ok(())
    }

    #[instrument(skip(self))]
    fn unload(&mut self) {
        if let Err(e) = self.capture.stop() {
            warn!(error = ?e, "Capture stop failed during unload");
        }
        self.overlay.shutdown(self.scheduler.as_mut());
        self.playback.eject(self.scheduler.as_mut());
        self.music.shutdown();
        self.notifier.shutdown(self.scheduler.as_mut());
        self.closed = true;

        info!(live_clips = self.registry.live_count(), "Studio unloaded");
    }

    fn notify(&mut self, message: impl AsRef<str>, severity: Severity) {
        self.notifier
            .notify(self.scheduler.as_mut(), message, severity);
    }

    fn control_phase(&self) -> ControlPhase {
        match self.capture.state() {
            CaptureState::Requesting { .. } | CaptureState::Recording { .. } => {
                ControlPhase::Capturing
            }
            CaptureState::Finalizing { .. } => ControlPhase::Finalizing,
            CaptureState::Idle if self.playback.clip().is_some() => ControlPhase::ClipReady,
            CaptureState::Idle => ControlPhase::Baseline,
        }
    }

    /// Derive the current view state.
    pub fn view_state(&self) -> ViewState {
        let phase = self.control_phase();
        ViewState {
            controls: Controls::for_phase(phase, self.music.has_track()),
            transport: self.playback.display().clone(),
            recording_indicator: self.capture.state().is_recording(),
            controls_overlay: phase == ControlPhase::ClipReady,
            timestamp_visible: self.overlay.is_visible(),
            music: self.music.state(),
            music_track: self.music.track_name().map(str::to_string),
            notification: self.notifier.current().cloned(),
        }
    }

    fn render(&mut self) {
        let state = self.view_state();
        if self.last_view.as_ref() != Some(&state) {
            self.view.render(&state);
            self.last_view = Some(state);
        }
    }

    /// Capture session.
    pub fn capture(&self) -> &CaptureSession {
        &self.capture
    }

    /// Playback controller.
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Timestamp overlay.
    pub fn overlay(&self) -> &TimestampOverlay {
        &self.overlay
    }

    /// Background music mixer.
    pub fn music(&self) -> &MusicMixer {
        &self.music
    }

    /// Notification channel.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Registry of live clip references.
    pub fn registry(&self) -> &Arc<ClipRegistry> {
        &self.registry
    }

    /// Whether [`StudioEvent::Unload`] has been processed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
