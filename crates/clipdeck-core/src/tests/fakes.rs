#![allow(clippy::unwrap_used)]

use crate::{
    CoreResult, Platform, Studio, StudioError, StudioEvent, StudioSettings, UserAction, View,
    ViewState,
    capture::{CaptureDevice, CaptureEvent, CaptureRequest, StreamId},
    clip::{ClipHandle, ClipRegistry},
    export::ClipExporter,
    music::AudioTrack,
    overlay::{OverlaySurface, TextStyle},
    playback::{FullscreenApi, PlaybackEvent, PlaybackSurface},
    timer::{Scheduler, TimerId, TimerTag},
};

use std::{
    panic::Location,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use error_location::ErrorLocation;

fn lock<T>(inner: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    inner.lock().unwrap()
}

// Scheduler

#[derive(Debug, Clone)]
pub struct ScheduledTimer {
    pub id: TimerId,
    pub tag: TimerTag,
    pub period: Duration,
    pub repeating: bool,
}

#[derive(Debug, Default)]
pub struct SchedulerLog {
    next_id: u64,
    pub active: Vec<ScheduledTimer>,
    pub cancelled: Vec<TimerId>,
}

/// Scheduler that only records timers; tests deliver firings by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<SchedulerLog>>,
}

impl ManualScheduler {
    pub fn log(&self) -> MutexGuard<'_, SchedulerLog> {
        lock(&self.inner)
    }

    pub fn is_active(&self, tag: TimerTag) -> bool {
        self.log().active.iter().any(|timer| timer.tag == tag)
    }

    pub fn count(&self, tag: TimerTag) -> usize {
        self.log().active.iter().filter(|timer| timer.tag == tag).count()
    }

    pub fn active_dismissals(&self) -> Vec<u64> {
        self.log()
            .active
            .iter()
            .filter_map(|timer| match timer.tag {
                TimerTag::DismissNotification { seq } => Some(seq),
                _ => None,
            })
            .collect()
    }

    /// Mark a one-shot timer as fired and return its tag.
    pub fn fire_once(&self, tag: TimerTag) -> Option<TimerTag> {
        let mut log = self.log();
        let index = log
            .active
            .iter()
            .position(|timer| timer.tag == tag && !timer.repeating)?;
        Some(log.active.remove(index).tag)
    }

    fn schedule(&mut self, period: Duration, tag: TimerTag, repeating: bool) -> TimerId {
        let mut log = self.log();
        log.next_id += 1;
        let id = TimerId(log.next_id);
        log.active.push(ScheduledTimer {
            id,
            tag,
            period,
            repeating,
        });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, period: Duration, tag: TimerTag) -> TimerId {
        self.schedule(period, tag, true)
    }

    fn once(&mut self, delay: Duration, tag: TimerTag) -> TimerId {
        self.schedule(delay, tag, false)
    }

    fn cancel(&mut self, id: TimerId) {
        let mut log = self.log();
        log.active.retain(|timer| timer.id != id);
        log.cancelled.push(id);
    }
}

// Capture device

#[derive(Debug, Default)]
pub struct CaptureLog {
    pub requests: Vec<CaptureRequest>,
    pub encoding: Vec<StreamId>,
    pub stopped: Vec<StreamId>,
    pub released: Vec<StreamId>,
    pub preview: Option<StreamId>,
    pub fail_encoding: bool,
    pub fail_finalize: bool,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeCapture {
    inner: Arc<Mutex<CaptureLog>>,
}

impl FakeCapture {
    pub fn log(&self) -> MutexGuard<'_, CaptureLog> {
        lock(&self.inner)
    }

    pub fn last_request(&self) -> CaptureRequest {
        *self.log().requests.last().unwrap()
    }
}

impl CaptureDevice for FakeCapture {
    fn request_access(&mut self, request: CaptureRequest) {
        self.log().requests.push(request);
    }

    #[track_caller]
    fn start_encoding(&mut self, stream: StreamId) -> CoreResult<()> {
        let mut log = self.log();
        if log.fail_encoding {
            return Err(StudioError::EncoderFailure {
                reason: "encoder rejected stream".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        log.encoding.push(stream);
        Ok(())
    }

    #[track_caller]
    fn stop_encoding(&mut self, stream: StreamId) -> CoreResult<()> {
        let mut log = self.log();
        if log.fail_finalize {
            return Err(StudioError::EncoderFailure {
                reason: "encoder already gone".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        log.stopped.push(stream);
        Ok(())
    }

    fn release_tracks(&mut self, stream: StreamId) {
        self.log().released.push(stream);
    }

    fn set_preview(&mut self, stream: Option<StreamId>) {
        self.log().preview = stream;
    }

    fn mime_type(&self) -> Option<String> {
        self.log().mime_type.clone()
    }
}

// Playback surface

#[derive(Debug)]
pub struct PlayerState {
    pub source: Option<String>,
    pub loads: usize,
    pub unloads: usize,
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub ended: bool,
    pub volume: f64,
    pub plays: usize,
    pub pauses: usize,
    pub fullscreen_supported: Vec<FullscreenApi>,
    pub fullscreen_tried: Vec<FullscreenApi>,
    pub size: (u32, u32),
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            source: None,
            loads: 0,
            unloads: 0,
            current_time: 0.0,
            duration: f64::NAN,
            paused: true,
            ended: false,
            volume: 1.0,
            plays: 0,
            pauses: 0,
            fullscreen_supported: vec![FullscreenApi::Standard],
            fullscreen_tried: Vec::new(),
            size: (640, 480),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakePlayer {
    inner: Arc<Mutex<PlayerState>>,
}

impl FakePlayer {
    pub fn state(&self) -> MutexGuard<'_, PlayerState> {
        lock(&self.inner)
    }
}

impl PlaybackSurface for FakePlayer {
    fn load(&mut self, clip: &ClipHandle) {
        let mut state = self.state();
        state.source = Some(clip.url().to_string());
        state.loads += 1;
        state.current_time = 0.0;
        state.paused = true;
        state.ended = false;
    }

    fn unload(&mut self) {
        let mut state = self.state();
        state.source = None;
        state.unloads += 1;
    }

    fn play(&mut self) {
        let mut state = self.state();
        state.plays += 1;
        state.paused = false;
        state.ended = false;
    }

    fn pause(&mut self) {
        let mut state = self.state();
        state.pauses += 1;
        state.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.state().current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.state().current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.state().duration
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn is_ended(&self) -> bool {
        self.state().ended
    }

    fn set_volume(&mut self, volume: f64) {
        self.state().volume = volume;
    }

    fn request_fullscreen(&mut self, api: FullscreenApi) -> bool {
        let mut state = self.state();
        state.fullscreen_tried.push(api);
        state.fullscreen_supported.contains(&api)
    }

    fn display_size(&self) -> (u32, u32) {
        self.state().size
    }
}

// Overlay surface

#[derive(Debug, Default)]
pub struct OverlayLog {
    pub visible: bool,
    pub size: (u32, u32),
    pub style: Option<TextStyle>,
    pub configures: usize,
    pub clears: usize,
    pub texts: Vec<(String, f64, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeOverlay {
    inner: Arc<Mutex<OverlayLog>>,
}

impl FakeOverlay {
    pub fn log(&self) -> MutexGuard<'_, OverlayLog> {
        lock(&self.inner)
    }
}

impl OverlaySurface for FakeOverlay {
    fn set_visible(&mut self, visible: bool) {
        self.log().visible = visible;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log().size = (width, height);
    }

    fn configure(&mut self, style: &TextStyle) {
        let mut log = self.log();
        log.style = Some(style.clone());
        log.configures += 1;
    }

    fn clear(&mut self) {
        self.log().clears += 1;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.log().texts.push((text.to_string(), x, y));
    }
}

// Music track

#[derive(Debug, Default)]
pub struct TrackLog {
    pub sources: Vec<String>,
    pub plays: usize,
    pub pauses: usize,
    pub volume: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTrack {
    inner: Arc<Mutex<TrackLog>>,
}

impl FakeTrack {
    pub fn log(&self) -> MutexGuard<'_, TrackLog> {
        lock(&self.inner)
    }
}

impl AudioTrack for FakeTrack {
    fn load(&mut self, clip: &ClipHandle) {
        self.log().sources.push(clip.url().to_string());
    }

    fn play(&mut self) {
        self.log().plays += 1;
    }

    fn pause(&mut self) {
        self.log().pauses += 1;
    }

    fn set_volume(&mut self, volume: f64) {
        self.log().volume = volume;
    }
}

// Exporter

#[derive(Debug, Clone)]
pub struct SavedFile {
    pub file_name: String,
    pub url: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Default)]
pub struct ExportLog {
    pub saved: Vec<SavedFile>,
    pub fail: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeExporter {
    inner: Arc<Mutex<ExportLog>>,
}

impl FakeExporter {
    pub fn log(&self) -> MutexGuard<'_, ExportLog> {
        lock(&self.inner)
    }
}

impl ClipExporter for FakeExporter {
    #[track_caller]
    fn save(&mut self, file_name: &str, clip: &ClipHandle) -> CoreResult<()> {
        let mut log = self.log();
        if log.fail {
            return Err(StudioError::ExportFailed {
                reason: "disk full".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        log.saved.push(SavedFile {
            file_name: file_name.to_string(),
            url: clip.url().to_string(),
            bytes: clip.clip().bytes().to_vec(),
            mime_type: clip.clip().mime_type().to_string(),
        });
        Ok(())
    }
}

// View

#[derive(Debug, Clone, Default)]
pub struct FakeView {
    inner: Arc<Mutex<Vec<ViewState>>>,
}

impl FakeView {
    pub fn renders(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn last(&self) -> ViewState {
        lock(&self.inner).last().cloned().unwrap()
    }
}

impl View for FakeView {
    fn render(&mut self, state: &ViewState) {
        lock(&self.inner).push(state.clone());
    }
}

/// A studio wired to fakes, with handles to inspect each of them.
pub struct Harness {
    pub studio: Studio,
    pub registry: Arc<ClipRegistry>,
    pub capture: FakeCapture,
    pub player: FakePlayer,
    pub overlay: FakeOverlay,
    pub track: FakeTrack,
    pub exporter: FakeExporter,
    pub view: FakeView,
    pub scheduler: ManualScheduler,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(StudioSettings::default())
    }

    pub fn with_settings(settings: StudioSettings) -> Self {
        let capture = FakeCapture::default();
        let player = FakePlayer::default();
        let overlay = FakeOverlay::default();
        let track = FakeTrack::default();
        let exporter = FakeExporter::default();
        let view = FakeView::default();
        let scheduler = ManualScheduler::default();
        let registry = ClipRegistry::new();

        let platform = Platform {
            capture: Box::new(capture.clone()),
            playback: Box::new(player.clone()),
            overlay: Box::new(overlay.clone()),
            music: Box::new(track.clone()),
            exporter: Box::new(exporter.clone()),
            view: Box::new(view.clone()),
            scheduler: Box::new(scheduler.clone()),
        };

        let studio = Studio::new(platform, settings, Arc::clone(&registry));

        Self {
            studio,
            registry,
            capture,
            player,
            overlay,
            track,
            exporter,
            view,
            scheduler,
        }
    }

    pub fn user(&mut self, action: UserAction) -> bool {
        self.studio.handle(StudioEvent::User(action))
    }

    pub fn capture_event(&mut self, event: CaptureEvent) -> bool {
        self.studio.handle(StudioEvent::Capture(event))
    }

    pub fn playback_event(&mut self, event: PlaybackEvent) -> bool {
        self.studio.handle(StudioEvent::Playback(event))
    }

    pub fn timer(&mut self, tag: TimerTag) -> bool {
        self.studio.handle(StudioEvent::Timer(tag))
    }

    /// Start capture and grant it on `stream`.
    pub fn start_recording(&mut self, stream: StreamId) {
        self.user(UserAction::StartCapture);
        let request = self.capture.last_request();
        self.capture_event(CaptureEvent::Granted { request, stream });
    }

    /// Record `chunks`, stop, finalize and load metadata with `duration`.
    pub fn record_clip(&mut self, stream: StreamId, chunks: &[&[u8]], duration: f64) {
        self.start_recording(stream);
        for chunk in chunks {
            self.capture_event(CaptureEvent::ChunkReady {
                stream,
                data: chunk.to_vec(),
            });
        }
        self.user(UserAction::StopCapture);
        self.capture_event(CaptureEvent::Finalized { stream });

        self.player.state().duration = duration;
        self.playback_event(PlaybackEvent::MetadataLoaded);
    }

    /// Play the bound clip and report it playing.
    pub fn play(&mut self) {
        self.user(UserAction::TogglePlayPause);
        self.playback_event(PlaybackEvent::Playing);
    }

    pub fn notification(&self) -> Option<String> {
        self.studio
            .notifier()
            .current()
            .map(|notification| notification.message.clone())
    }
}
