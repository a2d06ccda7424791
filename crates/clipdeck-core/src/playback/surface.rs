use crate::clip::ClipHandle;

/// Platform capability names for exclusive full-screen presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    /// The standard request.
    Standard,
    /// WebKit-prefixed request.
    Webkit,
    /// Legacy Microsoft-prefixed request.
    Ms,
}

/// Order in which full-screen capabilities are tried.
pub const FULLSCREEN_FALLBACKS: [FullscreenApi; 3] =
    [FullscreenApi::Standard, FullscreenApi::Webkit, FullscreenApi::Ms];

/// Lifecycle events emitted by the playback surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Metadata is available; duration may still be unknown.
    MetadataLoaded,
    /// Current time advanced. Frequency is not guaranteed.
    TimeUpdate,
    /// Playback started.
    Playing,
    /// Playback paused.
    Paused,
    /// Playback reached the end of the clip.
    Ended,
}

/// Audio/video playback element.
///
/// Transport requests are applied by the platform; resulting state changes
/// are reported back as [`PlaybackEvent`]s.
pub trait PlaybackSurface: Send {
    /// Bind a clip as the source and start loading it.
    fn load(&mut self, clip: &ClipHandle);

    /// Clear the source.
    fn unload(&mut self);

    /// Begin playback.
    fn play(&mut self);

    /// Pause playback.
    fn pause(&mut self);

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Move the position.
    fn set_current_time(&mut self, seconds: f64);

    /// Duration in seconds; NaN or infinite while not yet known.
    fn duration(&self) -> f64;

    /// Whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Whether playback reached the end.
    fn is_ended(&self) -> bool;

    /// Apply a volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);

    /// Try one full-screen capability. Returns `false` if unsupported.
    fn request_fullscreen(&mut self, api: FullscreenApi) -> bool;

    /// Displayed size of the surface in pixels.
    fn display_size(&self) -> (u32, u32);
}
