use crate::{
    CoreResult, StudioError,
    capture::{CaptureDevice, CaptureRequest, CaptureState, DenialReason, StreamId},
    clip::{Clip, Recording},
};

use std::{panic::Location, time::Instant};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// What [`CaptureSession::stop`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Nothing was active.
    Idle,
    /// A pending access request was cancelled.
    Cancelled,
    /// The encoder was asked to finalize; a clip follows on `Finalized`.
    Finalizing,
}

/// Drives one capture session at a time through to a sealed clip.
pub struct CaptureSession {
    device: Box<dyn CaptureDevice>,
    state: CaptureState,
    recording: Recording,
    mime_type: String,
    next_request: u64,
}

impl CaptureSession {
    /// Create an idle session over `device`.
    ///
    /// `mime_type` tags sealed clips unless the device dictates its own.
    pub fn new(device: Box<dyn CaptureDevice>, mime_type: impl Into<String>) -> Self {
        let mime_type = device.mime_type().unwrap_or_else(|| mime_type.into());
        Self {
            device,
            state: CaptureState::Idle,
            recording: Recording::new(),
            mime_type,
            next_request: 1,
        }
    }

    /// Request capture access and discard the previous recording.
    ///
    /// Returns `None` when a session is already active.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Option<CaptureRequest> {
        if self.state != CaptureState::Idle {
            debug!(state = ?self.state, "Start ignored, capture already active");
            return None;
        }

        let request = CaptureRequest(self.next_request);
        self.next_request += 1;
        let session_id = Uuid::new_v4();

        self.recording = Recording::new();
        self.state = CaptureState::Requesting {
            request,
            session_id,
        };
        self.device.request_access(request);

        info!(session_id = %session_id, request = request.0, "Capture access requested");

        Some(request)
    }

    /// Handle a granted access request.
    ///
    /// Returns `Ok(true)` once encoding runs and `Ok(false)` when the grant
    /// answered a cancelled or stale request (its tracks are released at once).
    #[instrument(skip(self))]
    pub fn on_granted(&mut self, request: CaptureRequest, stream: StreamId) -> CoreResult<bool> {
        let session_id = match self.state {
            CaptureState::Requesting {
                request: pending,
                session_id,
            } if pending == request => session_id,
            _ => {
                warn!(request = request.0, %stream, "Grant for cancelled request, releasing stream");
                self.device.release_tracks(stream);
                return Ok(false);
            }
        };

        self.device.set_preview(Some(stream));

        if let Err(e) = self.device.start_encoding(stream) {
            self.device.set_preview(None);
            self.device.release_tracks(stream);
            self.state = CaptureState::Idle;
            warn!(session_id = %session_id, %stream, error = ?e, "Encoder failed to start");
            return Err(e);
        }

        self.state = CaptureState::Recording {
            stream,
            started_at: Instant::now(),
            session_id,
        };

        info!(session_id = %session_id, %stream, "Recording started");

        Ok(true)
    }

    /// Handle a refused access request.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn on_denied(&mut self, request: CaptureRequest, reason: DenialReason) -> CoreResult<()> {
        match self.state {
            CaptureState::Requesting {
                request: pending, ..
            } if pending == request => {}
            _ => {
                debug!(request = request.0, "Denial for stale request ignored");
                return Ok(());
            }
        }

        self.state = CaptureState::Idle;

        Err(match reason {
            DenialReason::PermissionDenied(reason) => StudioError::PermissionDenied {
                reason,
                location: ErrorLocation::from(Location::caller()),
            },
            DenialReason::DeviceUnavailable(reason) => StudioError::DeviceUnavailable {
                reason,
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }

    /// Append an encoded chunk. Returns `true` when it was kept.
    pub fn on_chunk(&mut self, stream: StreamId, data: Vec<u8>) -> bool {
        if !self.state.owns_stream(stream) {
            debug!(%stream, chunk_len = data.len(), "Chunk for unknown stream dropped");
            return false;
        }

        let chunk_len = data.len();
        let kept = self.recording.append(data);
        if kept {
            debug!(
                %stream,
                chunk_len,
                chunk_count = self.recording.chunk_count(),
                "Chunk appended"
            );
        }
        kept
    }

    /// Stop capture. Idempotent.
    ///
    /// Device tracks are released here whether or not finalize succeeds.
    /// When the encoder cannot be asked to finalize, no `Finalized` will
    /// follow: the session returns to idle and the error is passed on.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<StopOutcome> {
        match self.state {
            CaptureState::Idle | CaptureState::Finalizing { .. } => Ok(StopOutcome::Idle),
            CaptureState::Requesting {
                request,
                session_id,
            } => {
                self.state = CaptureState::Idle;
                info!(session_id = %session_id, request = request.0, "Pending capture request cancelled");
                Ok(StopOutcome::Cancelled)
            }
            CaptureState::Recording {
                stream,
                started_at,
                session_id,
            } => {
                let finalize = self.device.stop_encoding(stream);
                self.device.release_tracks(stream);
                self.device.set_preview(None);

                if let Err(e) = finalize {
                    self.state = CaptureState::Idle;
                    warn!(
                        session_id = %session_id,
                        %stream,
                        chunk_count = self.recording.chunk_count(),
                        error = ?e,
                        "Encoder failed to finalize, recording abandoned"
                    );
                    return Err(e);
                }

                self.state = CaptureState::Finalizing { stream, session_id };

                info!(
                    session_id = %session_id,
                    duration_ms = started_at.elapsed().as_millis(),
                    "Recording stop requested"
                );

                Ok(StopOutcome::Finalizing)
            }
        }
    }

    /// Handle the encoder's finalize signal and seal the recording.
    ///
    /// Returns `None` for a stream this session is not finalizing.
    #[instrument(skip(self))]
    pub fn on_finalized(&mut self, stream: StreamId) -> Option<Clip> {
        let session_id = match self.state {
            CaptureState::Finalizing {
                stream: s,
                session_id,
            } if s == stream => session_id,
            _ => {
                debug!(%stream, "Finalize for unknown stream ignored");
                return None;
            }
        };

        self.state = CaptureState::Idle;
        let clip = self.recording.seal(&self.mime_type);

        info!(
            session_id = %session_id,
            chunk_count = self.recording.chunk_count(),
            byte_len = clip.len(),
            "Recording sealed"
        );

        Some(clip)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The current (or last sealed) recording.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// MIME type used for sealed clips.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
