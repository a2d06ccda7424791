use crate::CoreResult;

use std::fmt;

/// Identifier of one access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureRequest(pub u64);

/// Identifier of a granted live stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub u64);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream-{}", self.0)
    }
}

/// Why the platform refused capture access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The user or a policy refused access.
    PermissionDenied(String),
    /// No device exists or it could not be opened.
    DeviceUnavailable(String),
}

/// Completions and pushes coming from the capture device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Access granted; the stream is live.
    Granted {
        /// Request being answered.
        request: CaptureRequest,
        /// The live stream.
        stream: StreamId,
    },
    /// Access refused.
    Denied {
        /// Request being answered.
        request: CaptureRequest,
        /// Why access was refused.
        reason: DenialReason,
    },
    /// The encoder has a chunk ready.
    ChunkReady {
        /// Stream the chunk was encoded from.
        stream: StreamId,
        /// Encoded bytes.
        data: Vec<u8>,
    },
    /// The encoder fully ceased; no more chunks will arrive for the stream.
    Finalized {
        /// Stream whose encoder finalized.
        stream: StreamId,
    },
}

/// Combined audio+video capture device with its encoder.
///
/// Requests are fire-and-forget; answers come back as [`CaptureEvent`]s
/// through the studio's event channel, in capture order.
pub trait CaptureDevice: Send {
    /// Ask for audio+video access. Answered by `Granted` or `Denied`.
    fn request_access(&mut self, request: CaptureRequest);

    /// Start encoding a granted stream. Chunks arrive as `ChunkReady`.
    fn start_encoding(&mut self, stream: StreamId) -> CoreResult<()>;

    /// Ask the encoder to finalize. It flushes, then sends `Finalized`.
    ///
    /// An error means `Finalized` will never arrive for the stream.
    fn stop_encoding(&mut self, stream: StreamId) -> CoreResult<()>;

    /// Release every device track of the stream (hardware indicator off).
    fn release_tracks(&mut self, stream: StreamId);

    /// Show the live preview of a stream, or clear it.
    fn set_preview(&mut self, stream: Option<StreamId>);

    /// MIME type of the produced chunks, when the device dictates one.
    fn mime_type(&self) -> Option<String> {
        None
    }
}
