use crate::{
    overlay::{OverlaySettings, TextAlign, TextBaseline, TimestampOverlay},
    playback::PlaybackSnapshot,
    tests::fakes::{FakeOverlay, ManualScheduler},
    timer::TimerTag,
};

fn overlay() -> (TimestampOverlay, FakeOverlay, ManualScheduler) {
    let surface = FakeOverlay::default();
    let overlay = TimestampOverlay::new(Box::new(surface.clone()), OverlaySettings::default());
    (overlay, surface, ManualScheduler::default())
}

fn snapshot(current_time: f64, paused: bool) -> PlaybackSnapshot {
    PlaybackSnapshot {
        current_time,
        duration: 60.0,
        paused,
        ended: false,
    }
}

/// WHAT: Turning the overlay on during playback starts the refresh
/// WHY: The timestamp is redrawn on its own 100ms cadence
#[test]
fn given_active_playback_when_toggled_on_then_sized_styled_and_refreshing() {
    // Given: A hidden overlay
    let (mut overlay, surface, mut scheduler) = overlay();

    // When: Toggling on while playback is active
    let visible = overlay.toggle(&mut scheduler, (1280, 720), true);

    // Then: Layer matches the player, style applied, one refresh timer runs
    assert!(visible);
    assert!(overlay.is_refreshing());
    assert_eq!(scheduler.count(TimerTag::OverlayRefresh), 1);
    let log = surface.log();
    assert!(log.visible);
    assert_eq!(log.size, (1280, 720));
    let style = log.style.clone().unwrap_or_default();
    assert_eq!(style.font, "24px Inter");
    assert_eq!(style.align, TextAlign::Right);
    assert_eq!(style.baseline, TextBaseline::Top);
    assert_eq!(style.shadow_blur, 5.0);
}

/// WHAT: Turning the overlay on while paused draws nothing
/// WHY: The overlay only renders while content advances
#[test]
fn given_paused_playback_when_toggled_on_then_blank_until_playing() {
    // Given: Overlay toggled on while paused
    let (mut overlay, surface, mut scheduler) = overlay();
    overlay.toggle(&mut scheduler, (640, 480), false);

    // When: A redraw happens while still paused
    let drawn = overlay.redraw(&snapshot(4.0, true));

    // Then: No timer, no digits
    assert!(drawn.is_none());
    assert!(!overlay.is_refreshing());
    assert!(!scheduler.is_active(TimerTag::OverlayRefresh));
    assert!(surface.log().texts.is_empty());

    // When: Playback starts
    overlay.on_playback_changed(&mut scheduler, true);

    // Then: The refresh starts
    assert!(overlay.is_refreshing());
    assert!(scheduler.is_active(TimerTag::OverlayRefresh));
}

/// WHAT: Redraw renders MM:SS.CC at the top-right margin
/// WHY: Text is anchored 20px from the top-right corner of the player
#[test]
fn given_visible_overlay_when_redrawing_while_playing_then_text_at_top_right() {
    // Given: A visible overlay on a 640x480 player
    let (mut overlay, surface, mut scheduler) = overlay();
    overlay.toggle(&mut scheduler, (640, 480), true);

    // When: Redrawing at 3.25s while playing
    let drawn = overlay.redraw(&snapshot(3.25, false));

    // Then: The timestamp is drawn at (width - 20, 20)
    assert_eq!(drawn.as_deref(), Some("00:03.25"));
    assert_eq!(
        surface.log().texts,
        vec![("00:03.25".to_string(), 620.0, 20.0)]
    );
}

/// WHAT: Pausing stops the refresh and clears the layer
/// WHY: A frozen timestamp must never stay on screen
#[test]
fn given_refreshing_overlay_when_playback_pauses_then_timer_cancelled_and_cleared() {
    // Given: A refreshing overlay
    let (mut overlay, surface, mut scheduler) = overlay();
    overlay.toggle(&mut scheduler, (640, 480), true);
    let clears_before = surface.log().clears;

    // When: Playback pauses
    overlay.on_playback_changed(&mut scheduler, false);

    // Then: Timer gone, layer cleared, overlay still toggled on
    assert!(!overlay.is_refreshing());
    assert!(!scheduler.is_active(TimerTag::OverlayRefresh));
    assert!(surface.log().clears > clears_before);
    assert!(overlay.is_visible());
}

/// WHAT: Turning the overlay off cancels its timer immediately
/// WHY: No redraw may run for a hidden overlay
#[test]
fn given_refreshing_overlay_when_toggled_off_then_hidden_and_cancelled() {
    // Given: A refreshing overlay
    let (mut overlay, surface, mut scheduler) = overlay();
    overlay.toggle(&mut scheduler, (640, 480), true);

    // When: Toggling off
    let visible = overlay.toggle(&mut scheduler, (640, 480), true);

    // Then: Hidden, no timer, late redraws draw nothing
    assert!(!visible);
    assert!(!scheduler.is_active(TimerTag::OverlayRefresh));
    assert_eq!(scheduler.log().cancelled.len(), 1);
    assert!(!surface.log().visible);
    assert!(overlay.redraw(&snapshot(1.0, false)).is_none());
}

/// WHAT: Viewport resizes are only followed while visible
/// WHY: A hidden layer needs no resize work
#[test]
fn given_hidden_then_visible_overlay_when_viewport_resizes_then_only_visible_resized() {
    // Given: A hidden overlay
    let (mut overlay, surface, mut scheduler) = overlay();

    // When: Resizing while hidden
    overlay.on_viewport_resized((800, 600));

    // Then: Nothing happens
    assert_eq!(surface.log().configures, 0);
    assert_eq!(overlay.size(), (0, 0));

    // When: Visible, then resized
    overlay.toggle(&mut scheduler, (640, 480), false);
    overlay.on_viewport_resized((800, 600));

    // Then: Size follows and the style is re-applied
    assert_eq!(overlay.size(), (800, 600));
    assert_eq!(surface.log().size, (800, 600));
    assert_eq!(surface.log().configures, 2);
}
