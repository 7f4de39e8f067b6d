//! Timer engines for clockdeck.
//!
//! This module binds the pure state machines in `timing` to the runtime:
//! - `stopwatch`: stopwatch driven by a 10 ms ticker
//! - `countdown`: countdown driven by a 1 s ticker, with completion alerts
//! - `event`: events reported to the dashboard

pub mod countdown;
pub mod event;
pub mod stopwatch;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::trace;

pub use countdown::{CountdownEngine, COUNTDOWN_TICK};
pub use event::TimerEvent;
pub use stopwatch::{StopwatchEngine, STOPWATCH_TICK};

/// Sends an event, ignoring a dropped receiver.
fn emit(tx: &mpsc::UnboundedSender<TimerEvent>, event: TimerEvent) {
    if tx.send(event).is_err() {
        trace!("Timer event receiver dropped");
    }
}

/// Locks engine state. A panic while holding the lock cannot leave the
/// state machines invalid, so poisoning is ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
