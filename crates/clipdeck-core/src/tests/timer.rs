use crate::{
    StudioEvent,
    timer::{Scheduler, TimerTag, TokioScheduler},
};

use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc, time::Instant};

/// WHAT: A one-shot timer fires once after its delay
/// WHY: Notification dismissal depends on the delay being honoured
#[tokio::test(start_paused = true)]
async fn given_once_timer_when_delay_elapses_then_single_event() {
    // Given: A scheduler feeding a channel
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioScheduler::new(Handle::current(), tx);
    let tag = TimerTag::DismissNotification { seq: 7 };

    // When: Scheduling a 5 second one-shot
    scheduler.once(Duration::from_secs(5), tag);

    // Then: Nothing before 5 seconds, the tag right after
    let early = tokio::time::timeout(Duration::from_secs(4), rx.recv()).await;
    assert!(early.is_err());

    let fired = rx.recv().await;
    assert!(matches!(
        fired,
        Some(StudioEvent::Timer(TimerTag::DismissNotification { seq: 7 }))
    ));

    // Then: It never fires again
    let again = tokio::time::timeout(Duration::from_secs(30), rx.recv()).await;
    assert!(again.is_err());
}

/// WHAT: A repeating timer fires on every period
/// WHY: Overlay refresh and duration polling rely on a steady cadence
#[tokio::test(start_paused = true)]
async fn given_every_timer_when_running_then_fires_each_period() {
    // Given: A 100ms repeating timer
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioScheduler::new(Handle::current(), tx);
    let started = Instant::now();
    scheduler.every(Duration::from_millis(100), TimerTag::OverlayRefresh);

    // When: Receiving three firings
    for _ in 0..3 {
        let event = rx.recv().await;
        assert!(matches!(
            event,
            Some(StudioEvent::Timer(TimerTag::OverlayRefresh))
        ));
    }

    // Then: The first firing came one period in, not immediately
    assert!(started.elapsed() >= Duration::from_millis(300));
}

/// WHAT: A zero period still yields a running timer
/// WHY: A zero interval would kill the timer task and the redraws with it
#[tokio::test(start_paused = true)]
async fn given_zero_period_when_scheduling_every_then_timer_keeps_firing() {
    // Given: A scheduler
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioScheduler::new(Handle::current(), tx);

    // When: Scheduling with a zero period
    scheduler.every(Duration::ZERO, TimerTag::OverlayRefresh);

    // Then: It fires repeatedly and stays active
    for _ in 0..2 {
        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(
            event,
            Ok(Some(StudioEvent::Timer(TimerTag::OverlayRefresh)))
        ));
    }
    assert_eq!(scheduler.active_count(), 1);
}

/// WHAT: Cancelled timers stop firing
/// WHY: Turning the overlay off must stop its redraws
#[tokio::test(start_paused = true)]
async fn given_running_timer_when_cancelled_then_no_more_events() {
    // Given: A repeating timer
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioScheduler::new(Handle::current(), tx);
    let id = scheduler.every(Duration::from_millis(200), TimerTag::DurationPoll);
    assert_eq!(scheduler.active_count(), 1);

    // When: Cancelling it
    scheduler.cancel(id);

    // Then: Nothing arrives and nothing is tracked
    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
    assert!(event.is_err());
    assert_eq!(scheduler.active_count(), 0);
}

/// WHAT: Dropping the scheduler aborts its timers
/// WHY: Unloading the host must not leave timers sending into a dead loop
#[tokio::test(start_paused = true)]
async fn given_pending_timers_when_scheduler_dropped_then_channel_closes() {
    // Given: A scheduler with a pending timer
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioScheduler::new(Handle::current(), tx);
    scheduler.once(Duration::from_secs(1), TimerTag::OverlayRefresh);

    // When: Dropping the scheduler
    drop(scheduler);

    // Then: Every sender is gone once the aborted task unwinds
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(matches!(event, Ok(None)));
}
