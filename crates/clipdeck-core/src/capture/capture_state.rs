use crate::capture::{CaptureRequest, StreamId};

use std::time::Instant;

use uuid::Uuid;

/// Lifecycle of the capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture in progress.
    Idle,
    /// Waiting for the platform to answer the access request.
    Requesting {
        /// Outstanding request.
        request: CaptureRequest,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
    /// Encoding the live stream.
    Recording {
        /// Granted stream being encoded.
        stream: StreamId,
        /// When encoding started.
        started_at: Instant,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
    /// Stop requested; waiting for the encoder to flush and finalize.
    Finalizing {
        /// Stream whose encoder is finalizing.
        stream: StreamId,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
}

impl CaptureState {
    /// Whether the "recording active" indicator should be lit.
    pub fn is_recording(&self) -> bool {
        matches!(self, CaptureState::Recording { .. })
    }

    /// Whether `stream` is the one this session currently accepts chunks for.
    pub fn owns_stream(&self, stream: StreamId) -> bool {
        match *self {
            CaptureState::Recording { stream: s, .. } | CaptureState::Finalizing { stream: s, .. } => {
                s == stream
            }
            _ => false,
        }
    }
}
