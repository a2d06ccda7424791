//! Capture session lifecycle, from access request to sealed clip.

mod capture_state;
mod device;
mod session;

pub use {
    capture_state::CaptureState,
    device::{CaptureDevice, CaptureEvent, CaptureRequest, DenialReason, StreamId},
    session::{CaptureSession, StopOutcome},
};
