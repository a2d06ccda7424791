#![allow(clippy::unwrap_used)]

use crate::{
    App, AppCommand,
    backend::{FileExporter, HeadlessPlayer, HeadlessTrack, TerminalOverlay, TerminalView, Viewport},
    tests::temp_dir,
};

use std::{fs, path::Path, time::Duration};

use clipdeck_core::{
    CoreResult, Platform, Studio, StudioEvent, StudioSettings, UserAction,
    capture::{CaptureDevice, CaptureRequest, StreamId},
    clip::ClipRegistry,
    notify::Severity,
    timer::TokioScheduler,
};
use tokio::{runtime::Handle, sync::mpsc};

/// Capture device that never answers.
struct SilentCapture;

impl CaptureDevice for SilentCapture {
    fn request_access(&mut self, _request: CaptureRequest) {}

    fn start_encoding(&mut self, _stream: StreamId) -> CoreResult<()> {
        Ok(())
    }

    fn stop_encoding(&mut self, _stream: StreamId) -> CoreResult<()> {
        Ok(())
    }

    fn release_tracks(&mut self, _stream: StreamId) {}

    fn set_preview(&mut self, _stream: Option<StreamId>) {}
}

fn app(download_dir: &Path) -> App {
    let (tx, events_rx) = mpsc::unbounded_channel();
    let viewport = Viewport::new(1280, 720);

    let platform = Platform {
        capture: Box::new(SilentCapture),
        playback: Box::new(HeadlessPlayer::new(
            Handle::current(),
            tx.clone(),
            viewport.clone(),
            Duration::from_millis(250),
        )),
        overlay: Box::new(TerminalOverlay::new()),
        music: Box::new(HeadlessTrack::new(tx.clone())),
        exporter: Box::new(FileExporter::new(download_dir.to_path_buf()).unwrap()),
        view: Box::new(TerminalView::new()),
        scheduler: Box::new(TokioScheduler::new(Handle::current(), tx)),
    };

    App {
        studio: Studio::new(platform, StudioSettings::default(), ClipRegistry::new()),
        events_rx,
        viewport,
    }
}

fn notification(app: &App) -> Option<(String, Severity)> {
    app.studio
        .notifier()
        .current()
        .map(|n| (n.message.clone(), n.severity))
}

/// WHAT: Resize updates the shared viewport and keeps running
/// WHY: The overlay reads the player's size after `ViewportResized`
#[tokio::test(start_paused = true)]
async fn given_resize_command_when_handled_then_viewport_updated() {
    // Given: A running app
    let dir = temp_dir();
    let mut app = app(&dir);

    // When: Resizing
    let running = app.handle_command(AppCommand::Resize {
        width: 800,
        height: 600,
    });

    // Then: The viewport changed and the app continues
    assert!(running);
    assert_eq!(app.viewport.size(), (800, 600));

    fs::remove_dir_all(dir).unwrap();
}

/// WHAT: An unreadable music path is reported as a read error
/// WHY: A missing file must not look like a dismissed picker
#[tokio::test(start_paused = true)]
async fn given_missing_music_file_when_loading_then_read_error() {
    let dir = temp_dir();
    let mut app = app(&dir);

    let running = app.handle_command(AppCommand::LoadMusic(dir.join("absent.mp3")));

    assert!(running);
    assert_eq!(
        notification(&app),
        Some((
            "Could not read music file \"absent.mp3\".".to_string(),
            Severity::Error
        ))
    );
    assert!(!app.studio.view_state().controls.music_toggle);

    fs::remove_dir_all(dir).unwrap();
}

/// WHAT: A readable music file is loaded by name
/// WHY: The music toggle becomes usable once a track is loaded
#[tokio::test(start_paused = true)]
async fn given_music_file_when_loading_then_loaded_notification() {
    // Given: An mp3 next to the downloads
    let dir = temp_dir();
    let mut app = app(&dir);
    let path = dir.join("loop.mp3");
    fs::write(&path, [0xFFu8, 0xFB]).unwrap();

    // When: Loading it
    app.handle_command(AppCommand::LoadMusic(path));

    // Then: The studio reports the file and enables the toggle
    assert_eq!(
        notification(&app),
        Some(("Music file \"loop.mp3\" loaded!".to_string(), Severity::Success))
    );
    assert!(app.studio.view_state().controls.music_toggle);

    fs::remove_dir_all(dir).unwrap();
}

/// WHAT: Studio actions are forwarded, errors become notifications
/// WHY: Downloading before recording must warn rather than fail
#[tokio::test(start_paused = true)]
async fn given_download_without_recording_when_handled_then_warning() {
    let dir = temp_dir();
    let mut app = app(&dir);

    let running = app.handle_command(AppCommand::Studio(UserAction::Download));

    assert!(running);
    assert_eq!(
        notification(&app),
        Some((
            "No recording available to download.".to_string(),
            Severity::Warning
        ))
    );
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    fs::remove_dir_all(dir).unwrap();
}

/// WHAT: Help keeps running, shutdown stops the loop
/// WHY: Only an explicit quit or end of input ends the session
#[tokio::test(start_paused = true)]
async fn given_help_and_shutdown_when_handled_then_only_shutdown_stops() {
    let dir = temp_dir();
    let mut app = app(&dir);

    assert!(app.handle_command(AppCommand::Help));
    assert!(!app.handle_command(AppCommand::Shutdown));

    fs::remove_dir_all(dir).unwrap();
}

/// WHAT: Unload closes the studio and ends event handling
/// WHY: The run loop stops as soon as the studio reports closed
#[tokio::test(start_paused = true)]
async fn given_unload_when_handled_then_studio_closed() {
    let dir = temp_dir();
    let mut app = app(&dir);

    let running = app.studio.handle(StudioEvent::Unload);

    assert!(!running);
    assert!(app.studio.is_closed());
    assert_eq!(app.studio.registry().live_count(), 0);

    fs::remove_dir_all(dir).unwrap();
}
