use crate::studio::UserAction;

/// Coarse phase the controls are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPhase {
    /// Nothing captured or playing.
    Baseline,
    /// Access pending or recording.
    Capturing,
    /// Stop requested, waiting for the encoder to finalize.
    Finalizing,
    /// A clip is bound to the player.
    ClipReady,
}

/// Enabled flag of every user control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Start capture.
    pub start: bool,
    /// Stop capture.
    pub stop: bool,
    /// Play/pause.
    pub play_pause: bool,
    /// Rewind one step.
    pub rewind: bool,
    /// Forward one step.
    pub forward: bool,
    /// Progress bar seeking.
    pub seek: bool,
    /// Volume slider.
    pub volume: bool,
    /// Mute button.
    pub mute: bool,
    /// Full-screen button.
    pub fullscreen: bool,
    /// Download button.
    pub download: bool,
    /// Timestamp overlay toggle.
    pub timestamp: bool,
    /// Music file picker.
    pub music_upload: bool,
    /// Music play/pause.
    pub music_toggle: bool,
}

impl Controls {
    /// Controls for a phase; `track_loaded` gates the music toggle.
    pub fn for_phase(phase: ControlPhase, track_loaded: bool) -> Self {
        let clip_ready = phase == ControlPhase::ClipReady;
        let capturing = matches!(phase, ControlPhase::Capturing | ControlPhase::Finalizing);

        Self {
            start: matches!(phase, ControlPhase::Baseline | ControlPhase::ClipReady),
            stop: phase == ControlPhase::Capturing,
            play_pause: clip_ready,
            rewind: clip_ready,
            forward: clip_ready,
            seek: clip_ready,
            volume: clip_ready,
            mute: clip_ready,
            fullscreen: clip_ready,
            download: clip_ready,
            timestamp: clip_ready,
            music_upload: true,
            music_toggle: track_loaded && !capturing,
        }
    }

    /// Whether the control behind `action` is enabled.
    pub fn allows(&self, action: &UserAction) -> bool {
        match action {
            UserAction::StartCapture => self.start,
            UserAction::StopCapture => self.stop,
            UserAction::TogglePlayPause => self.play_pause,
            UserAction::Rewind => self.rewind,
            UserAction::Forward => self.forward,
            UserAction::Seek(_) => self.seek,
            UserAction::SetVolume(_) => self.volume,
            UserAction::ToggleMute => self.mute,
            UserAction::Fullscreen => self.fullscreen,
            UserAction::Download => self.download,
            UserAction::ToggleTimestamp => self.timestamp,
            UserAction::ChooseMusic(_) | UserAction::MusicUnreadable { .. } => self.music_upload,
            UserAction::ToggleMusic => self.music_toggle,
        }
    }
}
