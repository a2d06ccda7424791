//! Recorded clips and the registry of their live references.

mod recording;
mod registry;

pub use {
    recording::{Clip, Recording},
    registry::{ClipHandle, ClipRegistry},
};
