//! Timer seam used by the overlay, duration polling and notifications.

mod scheduler;
mod tokio_scheduler;

pub use {
    scheduler::{Scheduler, TimerId, TimerTag},
    tokio_scheduler::TokioScheduler,
};
