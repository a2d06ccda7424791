//! Transient user-facing status messages with auto-dismiss.

use crate::timer::{Scheduler, TimerId, TimerTag};

use std::time::Duration;

use tracing::{debug, info, instrument};

/// Default time a notification stays on screen.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Presentation class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// An action completed.
    Success,
    /// The action was refused; nothing broke.
    Warning,
    /// The action failed.
    Error,
}

/// A message currently displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic sequence number; the latest call wins.
    pub seq: u64,
    /// Text shown to the user.
    pub message: String,
    /// Presentation class.
    pub severity: Severity,
}

/// Single-slot notification channel.
///
/// A new message replaces the displayed one and restarts the dismissal
/// window from the new call.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notification>,
    next_seq: u64,
    pending_dismiss: Option<TimerId>,
    dismiss_after: Duration,
}

impl Notifier {
    /// Create a notifier dismissing messages after `dismiss_after`.
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            current: None,
            next_seq: 1,
            pending_dismiss: None,
            dismiss_after,
        }
    }

    /// Show `message`, superseding any displayed one.
    #[instrument(skip(self, scheduler, message), fields(message = %message.as_ref()))]
    pub fn notify(
        &mut self,
        scheduler: &mut dyn Scheduler,
        message: impl AsRef<str>,
        severity: Severity,
    ) -> u64 {
        if let Some(timer) = self.pending_dismiss.take() {
            scheduler.cancel(timer);
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        info!(seq, ?severity, "Notification shown");

        self.current = Some(Notification {
            seq,
            message: message.as_ref().to_string(),
            severity,
        });
        self.pending_dismiss =
            Some(scheduler.once(self.dismiss_after, TimerTag::DismissNotification { seq }));

        seq
    }

    /// Handle a dismissal timer. Stale timers are ignored.
    ///
    /// Returns `true` when the displayed message was removed.
    pub fn on_dismiss(&mut self, seq: u64) -> bool {
        match &self.current {
            Some(current) if current.seq == seq => {
                debug!(seq, "Notification dismissed");
                self.current = None;
                self.pending_dismiss = None;
                true
            }
            _ => false,
        }
    }

    /// The displayed message, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Cancel the pending dismissal without touching the displayed message.
    pub fn shutdown(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.pending_dismiss.take() {
            scheduler.cancel(timer);
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}
