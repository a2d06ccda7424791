use crate::{
    capture::CaptureEvent,
    music::{MediaFile, MusicEvent},
    playback::PlaybackEvent,
    timer::TimerTag,
};

use tokio::sync::mpsc;

/// Sender platforms use to push events into the studio loop.
pub type EventSender = mpsc::UnboundedSender<StudioEvent>;

/// User input from the controls surface.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Start capture.
    StartCapture,
    /// Stop capture.
    StopCapture,
    /// Play or pause the clip.
    TogglePlayPause,
    /// Move back one step.
    Rewind,
    /// Move forward one step.
    Forward,
    /// Seek to a fraction of the duration.
    Seek(f64),
    /// Set the playback volume.
    SetVolume(f64),
    /// Mute or unmute.
    ToggleMute,
    /// Request full-screen presentation.
    Fullscreen,
    /// Save the recording as a file.
    Download,
    /// Show or hide the timestamp overlay.
    ToggleTimestamp,
    /// A music file was picked, or the picker was dismissed.
    ChooseMusic(Option<MediaFile>),
    /// A music file was picked but its contents could not be read.
    MusicUnreadable {
        /// File name shown to the user.
        name: String,
        /// Why reading failed.
        reason: String,
    },
    /// Play or pause the music track.
    ToggleMusic,
}

/// Everything the studio reacts to. Each event runs to completion.
#[derive(Debug, Clone)]
pub enum StudioEvent {
    /// User input.
    User(UserAction),
    /// Capture device completion or push.
    Capture(CaptureEvent),
    /// Playback surface lifecycle event.
    Playback(PlaybackEvent),
    /// Music track completion.
    Music(MusicEvent),
    /// A scheduled timer fired.
    Timer(TimerTag),
    /// The containing viewport changed size.
    ViewportResized,
    /// The host is going away.
    Unload,
}
