use std::{fmt, time::Duration};

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// What a timer firing means to the studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTag {
    /// Redraw the timestamp overlay.
    OverlayRefresh,
    /// Re-check whether the player now reports a finite duration.
    DurationPoll,
    /// Dismiss the notification with this sequence number.
    DismissNotification {
        /// Sequence number of the notification the timer belongs to.
        seq: u64,
    },
}

/// Schedules timer firings back into the studio's event loop.
///
/// A firing may still be delivered after [`Scheduler::cancel`] if it was
/// already queued; handlers re-check their own state.
pub trait Scheduler: Send {
    /// Fire `tag` every `period`, starting one period from now.
    fn every(&mut self, period: Duration, tag: TimerTag) -> TimerId;

    /// Fire `tag` once after `delay`.
    fn once(&mut self, delay: Duration, tag: TimerTag) -> TimerId;

    /// Stop a timer. Unknown ids are ignored.
    fn cancel(&mut self, id: TimerId);
}
