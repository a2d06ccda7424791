use crate::{
    studio::{EventSender, StudioEvent},
    timer::{Scheduler, TimerId, TimerTag},
};

use std::{collections::HashMap, time::Duration};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, trace};

/// Shortest period a repeating timer runs at.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// [`Scheduler`] backed by tokio tasks.
///
/// Each timer is a task sending [`StudioEvent::Timer`] into the studio's
/// channel. Cancelling aborts the task.
pub struct TokioScheduler {
    runtime: Handle,
    events: EventSender,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto `runtime`.
    pub fn new(runtime: Handle, events: EventSender) -> Self {
        Self {
            runtime,
            events,
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of timers that have not finished or been cancelled.
    pub fn active_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn register(&mut self, task: JoinHandle<()>) -> TimerId {
        // One-shot timers leave finished handles behind.
        self.tasks.retain(|_, task| !task.is_finished());

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(id, task);
        id
    }
}

impl Scheduler for TokioScheduler {
    fn every(&mut self, period: Duration, tag: TimerTag) -> TimerId {
        if period < MIN_PERIOD {
            debug!(?tag, period_ms = period.as_millis(), "Timer period raised to the minimum");
        }
        let period = period.max(MIN_PERIOD);

        let events = self.events.clone();
        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(StudioEvent::Timer(tag)).is_err() {
                    break;
                }
            }
        });

        let id = self.register(task);
        debug!(timer_id = %id, ?tag, period_ms = period.as_millis(), "Repeating timer scheduled");
        id
    }

    fn once(&mut self, delay: Duration, tag: TimerTag) -> TimerId {
        let events = self.events.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(StudioEvent::Timer(tag));
        });

        let id = self.register(task);
        trace!(timer_id = %id, ?tag, delay_ms = delay.as_millis(), "One-shot timer scheduled");
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            trace!(timer_id = %id, "Timer cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
