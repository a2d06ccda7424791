//! Microphone capture device built on cpal.
//!
//! Each granted stream lives on its own worker thread: cpal streams are not
//! `Send` on every platform, so the studio only ever holds a control channel.
//! Encoded chunks are signed 16-bit PCM in network byte order, matching the
//! `audio/L16` media type.

use clipdeck_core::{
    CoreResult, EventSender, StudioError, StudioEvent,
    capture::{CaptureDevice, CaptureEvent, CaptureRequest, DenialReason, StreamId},
};

use std::{
    collections::HashMap,
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use cpal::{
    BuildStreamError, Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Maximum samples buffered between two chunks (10 seconds at 48kHz stereo).
pub(crate) const MAX_PENDING_SAMPLES: usize = 48_000 * 2 * 10;

/// `audio/L16` media type for a sample rate and channel count.
pub fn pcm_mime_type(sample_rate: u32, channels: u16) -> String {
    format!("audio/L16;rate={sample_rate};channels={channels}")
}

/// Convert float samples to big-endian signed 16-bit PCM.
pub fn encode_l16(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|sample| {
            let scaled = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            scaled.to_be_bytes()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamControl {
    StartEncoding,
    Finalize,
    Release,
}

/// Cloneable selection of the input device.
#[derive(Debug, Clone)]
struct DeviceSelector {
    selected: Option<String>,
}

impl DeviceSelector {
    fn open(&self) -> Result<Device, DenialReason> {
        let host = cpal::default_host();

        let Some(name) = &self.selected else {
            return host
                .default_input_device()
                .ok_or_else(|| DenialReason::DeviceUnavailable("No microphone found".to_string()));
        };

        let mut devices = host
            .input_devices()
            .map_err(|e| DenialReason::DeviceUnavailable(format!("Failed to list devices: {}", e)))?;

        #[allow(deprecated)]
        let found = devices.find(|device| device.name().is_ok_and(|n| n == *name));

        found.ok_or_else(|| DenialReason::DeviceUnavailable(format!("Input device {name:?} not found")))
    }
}

/// Control channel and thread of one stream worker.
struct LiveStream {
    control: mpsc::Sender<StreamControl>,
    worker: thread::JoinHandle<()>,
}

/// [`CaptureDevice`] recording the microphone.
pub struct MicrophoneCapture {
    selector: DeviceSelector,
    events: EventSender,
    chunk_interval: Duration,
    mime_type: Option<String>,
    streams: HashMap<StreamId, LiveStream>,
    next_stream: u64,
}

impl MicrophoneCapture {
    /// Create a capture device for the named input (None = default device).
    ///
    /// The device is probed once to learn the PCM format of its chunks.
    #[instrument(skip(events))]
    pub fn new(selected_device: Option<String>, chunk_interval: Duration, events: EventSender) -> Self {
        let selector = DeviceSelector {
            selected: selected_device,
        };

        let mime_type = match selector.open() {
            Ok(device) => match device.default_input_config() {
                Ok(config) => {
                    let mime_type = pcm_mime_type(config.sample_rate(), config.channels());
                    info!(mime_type = %mime_type, "Microphone probed");
                    Some(mime_type)
                }
                Err(e) => {
                    warn!(error = %e, "Microphone config unavailable");
                    None
                }
            },
            Err(reason) => {
                warn!(?reason, "No microphone at startup");
                None
            }
        };

        Self {
            selector,
            events,
            chunk_interval,
            mime_type,
            streams: HashMap::new(),
            next_stream: 1,
        }
    }

    /// Forget streams whose worker has exited. Returns how many remain.
    ///
    /// Workers of denied requests exit without a `release_tracks` call.
    pub(crate) fn prune_finished(&mut self) -> usize {
        let before = self.streams.len();
        self.streams.retain(|_, live| !live.worker.is_finished());
        let pruned = before - self.streams.len();
        if pruned > 0 {
            debug!(pruned, "Finished capture workers dropped");
        }
        self.streams.len()
    }

    #[track_caller]
    fn send(&mut self, stream: StreamId, control: StreamControl) -> CoreResult<()> {
        let Some(live) = self.streams.get(&stream) else {
            return Err(StudioError::EncoderFailure {
                reason: format!("{stream} is not live"),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if live.control.send(control).is_err() {
            self.streams.remove(&stream);
            return Err(StudioError::EncoderFailure {
                reason: format!("{stream} worker stopped"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

impl CaptureDevice for MicrophoneCapture {
    #[instrument(skip(self))]
    fn request_access(&mut self, request: CaptureRequest) {
        self.prune_finished();

        let stream = StreamId(self.next_stream);
        self.next_stream += 1;

        let (control_tx, control_rx) = mpsc::channel();

        let worker = StreamWorker {
            selector: self.selector.clone(),
            events: self.events.clone(),
            chunk_interval: self.chunk_interval,
            request,
            stream,
        };

        let spawned = thread::Builder::new()
            .name(format!("clipdeck-{stream}"))
            .spawn(move || worker.run(control_rx));

        match spawned {
            Ok(worker) => {
                self.streams.insert(
                    stream,
                    LiveStream {
                        control: control_tx,
                        worker,
                    },
                );
            }
            Err(e) => {
                error!(error = %e, "Failed to spawn capture worker");
                let _ = self.events.send(StudioEvent::Capture(CaptureEvent::Denied {
                    request,
                    reason: DenialReason::DeviceUnavailable(format!("Failed to spawn worker: {}", e)),
                }));
            }
        }
    }

    #[track_caller]
    fn start_encoding(&mut self, stream: StreamId) -> CoreResult<()> {
        self.send(stream, StreamControl::StartEncoding)
    }

    #[track_caller]
    fn stop_encoding(&mut self, stream: StreamId) -> CoreResult<()> {
        self.send(stream, StreamControl::Finalize)
    }

    fn release_tracks(&mut self, stream: StreamId) {
        if let Some(live) = self.streams.remove(&stream) {
            // The worker drains Finalize before Release.
            let _ = live.control.send(StreamControl::Release);
            debug!(%stream, "Microphone tracks released");
        }
    }

    fn set_preview(&mut self, stream: Option<StreamId>) {
        match stream {
            Some(stream) => info!(%stream, "Monitoring microphone (no video preview)"),
            None => debug!("Preview cleared"),
        }
    }

    fn mime_type(&self) -> Option<String> {
        self.mime_type.clone()
    }
}

impl Drop for MicrophoneCapture {
    fn drop(&mut self) {
        for (_, live) in self.streams.drain() {
            let _ = live.control.send(StreamControl::Release);
        }
    }
}

/// Owns one cpal stream for its whole life.
struct StreamWorker {
    selector: DeviceSelector,
    events: EventSender,
    chunk_interval: Duration,
    request: CaptureRequest,
    stream: StreamId,
}

impl StreamWorker {
    fn run(self, control: mpsc::Receiver<StreamControl>) {
        let encoding = Arc::new(AtomicBool::new(false));
        let pending = Arc::new(Mutex::new(Vec::<f32>::new()));

        let live = match self.open(Arc::clone(&encoding), Arc::clone(&pending)) {
            Ok(live) => live,
            Err(reason) => {
                warn!(request = self.request.0, ?reason, "Microphone access denied");
                self.emit(CaptureEvent::Denied {
                    request: self.request,
                    reason,
                });
                return;
            }
        };

        if !self.emit(CaptureEvent::Granted {
            request: self.request,
            stream: self.stream,
        }) {
            return;
        }

        loop {
            match control.recv_timeout(self.chunk_interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if encoding.load(Ordering::Acquire) && !self.flush(&pending) {
                        break;
                    }
                }
                Ok(StreamControl::StartEncoding) => {
                    take_pending(&pending);
                    encoding.store(true, Ordering::Release);
                    info!(stream = %self.stream, "Encoding started");
                }
                Ok(StreamControl::Finalize) => {
                    encoding.store(false, Ordering::Release);
                    self.flush(&pending);
                    self.emit(CaptureEvent::Finalized {
                        stream: self.stream,
                    });
                    info!(stream = %self.stream, "Encoder finalized");
                }
                Ok(StreamControl::Release) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        drop(live);
        info!(stream = %self.stream, "Microphone stream closed");
    }

    fn open(
        &self,
        encoding: Arc<AtomicBool>,
        pending: Arc<Mutex<Vec<f32>>>,
    ) -> Result<Stream, DenialReason> {
        let device = self.selector.open()?;

        let config: StreamConfig = device
            .default_input_config()
            .map_err(|e| DenialReason::DeviceUnavailable(format!("Failed to get config: {}", e)))?
            .into();

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !encoding.load(Ordering::Acquire) {
                        return;
                    }
                    let mut buf = pending.lock().unwrap_or_else(|e| {
                        error!("Pending sample lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    buf.extend_from_slice(data);
                    if buf.len() > MAX_PENDING_SAMPLES {
                        let excess = buf.len() - MAX_PENDING_SAMPLES;
                        buf.drain(..excess);
                    }
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| match e {
                BuildStreamError::DeviceNotAvailable => {
                    DenialReason::DeviceUnavailable(e.to_string())
                }
                other => DenialReason::PermissionDenied(other.to_string()),
            })?;

        stream
            .play()
            .map_err(|e| DenialReason::PermissionDenied(format!("Failed to start stream: {}", e)))?;

        Ok(stream)
    }

    /// Send pending samples as one chunk. Returns `false` once the studio is gone.
    fn flush(&self, pending: &Mutex<Vec<f32>>) -> bool {
        let samples = take_pending(pending);
        if samples.is_empty() {
            return true;
        }

        let data = encode_l16(&samples);
        debug!(stream = %self.stream, chunk_len = data.len(), "Chunk encoded");
        self.emit(CaptureEvent::ChunkReady {
            stream: self.stream,
            data,
        })
    }

    fn emit(&self, event: CaptureEvent) -> bool {
        self.events.send(StudioEvent::Capture(event)).is_ok()
    }
}

fn take_pending(pending: &Mutex<Vec<f32>>) -> Vec<f32> {
    let mut buf = pending.lock().unwrap_or_else(|e| {
        error!("Pending sample lock poisoned, recovering: {}", e);
        e.into_inner()
    });
    std::mem::take(&mut *buf)
}
