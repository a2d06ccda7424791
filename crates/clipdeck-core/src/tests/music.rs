#![allow(clippy::unwrap_used)]

use crate::{
    StudioError,
    clip::ClipRegistry,
    music::{DEFAULT_VOLUME_RATIO, MediaFile, MusicMixer, MusicState},
    tests::fakes::FakeTrack,
};

fn mixer(main_volume: f64) -> (MusicMixer, FakeTrack) {
    let track = FakeTrack::default();
    let mixer = MusicMixer::new(Box::new(track.clone()), DEFAULT_VOLUME_RATIO, main_volume);
    (mixer, track)
}

fn mp3(name: &str) -> MediaFile {
    MediaFile::new(name, "audio/mpeg", vec![0xFF, 0xFB, 0x90])
}

/// WHAT: Music volume is half the playback volume
/// WHY: Background music must never drown out the recording
#[test]
fn given_any_main_volume_when_syncing_then_music_is_half() {
    // Given: A mixer created at full playback volume
    let (mut mixer, track) = mixer(1.0);
    assert_eq!(mixer.volume(), 0.5);

    // When/Then: Every main volume maps to half
    for main in [0.0, 0.1, 0.37, 0.8, 1.0] {
        mixer.sync_volume(main);
        assert_eq!(mixer.volume(), main * 0.5);
        assert_eq!(track.log().volume, main * 0.5);
    }
}

/// WHAT: Toggling without a track fails fast
/// WHY: The user has to upload music first
#[test]
fn given_no_track_when_toggling_then_no_track_loaded() {
    // Given: An empty mixer
    let (mut mixer, track) = mixer(1.0);

    // When: Toggling
    let result = mixer.toggle();

    // Then: Rejected without touching the track
    assert!(matches!(result, Err(StudioError::NoTrackLoaded { .. })));
    assert_eq!(track.log().plays, 0);
}

/// WHAT: Non-audio uploads are rejected and change nothing
/// WHY: A bad upload must not disturb a working track
#[test]
fn given_loaded_track_when_uploading_text_file_then_rejected_and_track_kept() {
    // Given: A mixer with a track loaded
    let registry = ClipRegistry::new();
    let (mut mixer, track) = mixer(1.0);
    mixer.load_track(&registry, mp3("song.mp3"), 1.0).unwrap();

    // When: Uploading a text file
    let result = mixer.load_track(
        &registry,
        MediaFile::new("notes.txt", "text/plain", b"hello".to_vec()),
        1.0,
    );

    // Then: Rejected, previous track untouched
    assert!(matches!(result, Err(StudioError::InvalidMediaType { .. })));
    assert!(mixer.has_track());
    assert_eq!(mixer.track_name(), Some("song.mp3"));
    assert_eq!(track.log().sources.len(), 1);
    assert_eq!(registry.live_count(), 1);
}

/// WHAT: Loading a track binds it paused at the derived volume
/// WHY: Loading must never start playback by itself
#[test]
fn given_audio_file_when_loading_then_paused_and_volume_synced() {
    // Given: A mixer and playback volume 0.6
    let registry = ClipRegistry::new();
    let (mut mixer, track) = mixer(1.0);

    // When: Loading an mp3
    mixer.load_track(&registry, mp3("song.mp3"), 0.6).unwrap();

    // Then: Bound, paused, volume derived
    assert_eq!(mixer.state(), MusicState::Stopped);
    assert_eq!(mixer.volume(), 0.3);
    let log = track.log();
    assert_eq!(log.sources.len(), 1);
    assert!(log.pauses >= 1);
    assert_eq!(log.plays, 0);
}

/// WHAT: Loading a second track releases the first reference
/// WHY: Only one music clip reference may be live
#[test]
fn given_loaded_track_when_loading_another_then_single_live_reference() {
    // Given: One track loaded
    let registry = ClipRegistry::new();
    let (mut mixer, _) = mixer(1.0);
    mixer.load_track(&registry, mp3("a.mp3"), 1.0).unwrap();

    // When: Loading another
    mixer.load_track(&registry, mp3("b.mp3"), 1.0).unwrap();

    // Then: One reference, named after the new file
    assert_eq!(registry.live_count(), 1);
    assert_eq!(mixer.track_name(), Some("b.mp3"));
}

/// WHAT: Play is asynchronous and pause is immediate
/// WHY: The platform confirms playback with a later event
#[test]
fn given_loaded_track_when_toggling_then_starting_playing_stopped() {
    // Given: A loaded track
    let registry = ClipRegistry::new();
    let (mut mixer, track) = mixer(1.0);
    mixer.load_track(&registry, mp3("song.mp3"), 1.0).unwrap();

    // When: Toggling on, the platform confirming, toggling off
    let starting = mixer.toggle().unwrap();
    let confirmed = mixer.on_started();
    let playing = mixer.state();
    let stopped = mixer.toggle().unwrap();

    // Then: The states follow in order
    assert_eq!(starting, MusicState::Starting);
    assert!(confirmed);
    assert_eq!(playing, MusicState::Playing);
    assert_eq!(stopped, MusicState::Stopped);
    assert_eq!(track.log().plays, 1);
}

/// WHAT: A rejected play leaves the mixer stopped with an error
/// WHY: Decoding failures must surface a distinct message
#[test]
fn given_starting_track_when_platform_fails_then_stopped_with_error() {
    // Given: A track asked to play
    let registry = ClipRegistry::new();
    let (mut mixer, _) = mixer(1.0);
    mixer.load_track(&registry, mp3("broken.mp3"), 1.0).unwrap();
    mixer.toggle().unwrap();

    // When: The platform rejects it
    let result = mixer.on_failed("decode error".to_string());

    // Then: Error raised, mixer not playing
    assert!(matches!(
        result,
        Err(StudioError::PlaybackStartFailure { .. })
    ));
    assert_eq!(mixer.state(), MusicState::Stopped);
}

/// WHAT: A start confirmation after pausing is ignored
/// WHY: The user's pause wins over a slow platform
#[test]
fn given_paused_while_starting_when_start_confirmed_then_stays_stopped() {
    // Given: Play then pause before confirmation
    let registry = ClipRegistry::new();
    let (mut mixer, _) = mixer(1.0);
    mixer.load_track(&registry, mp3("song.mp3"), 1.0).unwrap();
    mixer.toggle().unwrap();
    mixer.toggle().unwrap();

    // When: The late confirmation arrives
    let accepted = mixer.on_started();

    // Then: Still stopped
    assert!(!accepted);
    assert_eq!(mixer.state(), MusicState::Stopped);
}

/// WHAT: Shutdown releases the track reference
/// WHY: Unloading must not leak the music clip
#[test]
fn given_loaded_track_when_shutting_down_then_reference_released() {
    // Given: A loaded track
    let registry = ClipRegistry::new();
    let (mut mixer, _) = mixer(1.0);
    mixer.load_track(&registry, mp3("song.mp3"), 1.0).unwrap();

    // When: Shutting down
    mixer.shutdown();

    // Then: Nothing is live
    assert_eq!(registry.live_count(), 0);
    assert!(!mixer.has_track());
}
