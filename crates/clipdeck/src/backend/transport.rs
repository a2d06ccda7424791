//! Headless playback surface.
//!
//! Keeps a transport clock for the loaded clip and reports the same
//! lifecycle events a media element would. Nothing is rendered.

use clipdeck_core::{
    EventSender, StudioEvent,
    clip::ClipHandle,
    playback::{FullscreenApi, PlaybackEvent, PlaybackSurface},
};

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument, warn};

/// Duration in seconds of an `audio/L16` clip of `byte_len` bytes.
///
/// Returns `None` for any other media type, or when rate or channels are
/// missing.
pub fn pcm_duration(mime_type: &str, byte_len: usize) -> Option<f64> {
    let mut params = mime_type.split(';').map(str::trim);
    if !params.next()?.eq_ignore_ascii_case("audio/L16") {
        return None;
    }

    let mut rate = None;
    let mut channels = None;
    for param in params {
        match param.split_once('=') {
            Some(("rate", value)) => rate = value.parse::<u32>().ok(),
            Some(("channels", value)) => channels = value.parse::<u16>().ok(),
            _ => {}
        }
    }

    let bytes_per_second = f64::from(rate?) * f64::from(channels?) * 2.0;
    (bytes_per_second > 0.0).then(|| byte_len as f64 / bytes_per_second)
}

/// Shared size of the area the player is displayed in.
#[derive(Debug, Clone)]
pub struct Viewport {
    size: Arc<Mutex<(u32, u32)>>,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Arc::new(Mutex::new((width, height))),
        }
    }

    /// Change the size.
    pub fn resize(&self, width: u32, height: u32) {
        *self.lock() = (width, height);
        debug!(width, height, "Viewport resized");
    }

    /// Current size in pixels.
    pub fn size(&self) -> (u32, u32) {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, (u32, u32)> {
        self.size.lock().unwrap_or_else(|e| {
            error!("Viewport lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

#[derive(Debug)]
struct Transport {
    source: Option<String>,
    duration: f64,
    position: f64,
    playing_since: Option<Instant>,
    ended: bool,
    volume: f64,
}

impl Transport {
    fn current_time(&self) -> f64 {
        let elapsed = self
            .playing_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or_default();
        let time = self.position + elapsed;
        if self.duration.is_finite() {
            time.min(self.duration)
        } else {
            time
        }
    }

    /// Settle the clock; reports whether the end was reached.
    fn settle(&mut self) -> bool {
        let time = self.current_time();
        if self.duration.is_finite() && time >= self.duration {
            self.position = self.duration;
            self.playing_since = None;
            self.ended = true;
            return true;
        }
        false
    }
}

/// [`PlaybackSurface`] without a screen.
pub struct HeadlessPlayer {
    state: Arc<Mutex<Transport>>,
    events: EventSender,
    viewport: Viewport,
    runtime: Handle,
    tick: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl HeadlessPlayer {
    /// Create a player emitting `TimeUpdate` every `tick` while playing.
    pub fn new(runtime: Handle, events: EventSender, viewport: Viewport, tick: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(Transport {
                source: None,
                duration: f64::NAN,
                position: 0.0,
                playing_since: None,
                ended: false,
                volume: 1.0,
            })),
            events,
            viewport,
            runtime,
            tick,
            ticker: None,
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        if self.events.send(StudioEvent::Playback(event)).is_err() {
            debug!(?event, "Studio gone, playback event dropped");
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn start_ticker(&mut self) {
        self.stop_ticker();

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let tick = self.tick;

        self.ticker = Some(self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let ended = lock(&state).settle();
                let event = if ended {
                    PlaybackEvent::Ended
                } else {
                    PlaybackEvent::TimeUpdate
                };
                if events.send(StudioEvent::Playback(event)).is_err() || ended {
                    break;
                }
            }
        }));
    }
}

impl PlaybackSurface for HeadlessPlayer {
    #[instrument(skip(self, clip))]
    fn load(&mut self, clip: &ClipHandle) {
        self.stop_ticker();

        let duration = pcm_duration(clip.clip().mime_type(), clip.clip().len()).unwrap_or(f64::NAN);
        {
            let mut state = lock(&self.state);
            state.source = Some(clip.url().to_string());
            state.duration = duration;
            state.position = 0.0;
            state.playing_since = None;
            state.ended = false;
        }

        info!(url = clip.url(), duration, "Clip loaded");
        self.emit(PlaybackEvent::MetadataLoaded);
    }

    fn unload(&mut self) {
        self.stop_ticker();

        let mut state = lock(&self.state);
        if let Some(source) = state.source.take() {
            debug!(url = %source, "Source cleared");
        }
        state.duration = f64::NAN;
        state.position = 0.0;
        state.playing_since = None;
        state.ended = false;
    }

    fn play(&mut self) {
        {
            let mut state = lock(&self.state);
            if state.source.is_none() {
                warn!("Play requested without a source");
                return;
            }
            if state.playing_since.is_some() {
                return;
            }
            if state.ended {
                state.position = 0.0;
                state.ended = false;
            }
            state.playing_since = Some(Instant::now());
            debug!(position = state.position, volume = state.volume, "Transport running");
        }

        self.start_ticker();
        self.emit(PlaybackEvent::Playing);
    }

    fn pause(&mut self) {
        self.stop_ticker();
        {
            let mut state = lock(&self.state);
            if state.playing_since.is_none() {
                return;
            }
            let now = state.current_time();
            state.position = now;
            state.playing_since = None;
        }
        self.emit(PlaybackEvent::Paused);
    }

    fn current_time(&self) -> f64 {
        lock(&self.state).current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        {
            let mut state = lock(&self.state);
            let upper = if state.duration.is_finite() {
                state.duration
            } else {
                f64::MAX
            };
            state.position = seconds.clamp(0.0, upper);
            state.ended = false;
            if state.playing_since.is_some() {
                state.playing_since = Some(Instant::now());
            }
        }
        self.emit(PlaybackEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        lock(&self.state).duration
    }

    fn is_paused(&self) -> bool {
        lock(&self.state).playing_since.is_none()
    }

    fn is_ended(&self) -> bool {
        lock(&self.state).ended
    }

    fn set_volume(&mut self, volume: f64) {
        lock(&self.state).volume = volume;
        debug!(volume, "Playback volume set");
    }

    fn request_fullscreen(&mut self, api: FullscreenApi) -> bool {
        // The terminal only knows the standard request.
        if api == FullscreenApi::Standard {
            info!("Presenting full screen");
            true
        } else {
            false
        }
    }

    fn display_size(&self) -> (u32, u32) {
        self.viewport.size()
    }
}

impl Drop for HeadlessPlayer {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn lock(state: &Mutex<Transport>) -> MutexGuard<'_, Transport> {
    state.lock().unwrap_or_else(|e| {
        error!("Transport lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}
