//! Stopwatch engine.

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::debug;

use super::{emit, lock, TimerEvent};
use crate::timing::{Lap, Stopwatch, SystemTimeSource, TickFlow, TickerSlot, TimeSource};
use crate::types::RunState;

/// Stopwatch refresh period.
pub const STOPWATCH_TICK: Duration = Duration::from_millis(10);

#[derive(Debug, Default)]
struct Shared {
    stopwatch: Stopwatch,
    ticker: TickerSlot,
}

/// Runs a [`Stopwatch`] on a 10 ms ticker and reports [`TimerEvent`]s.
///
/// Dropping the engine stops its ticker.
pub struct StopwatchEngine<S: TimeSource = SystemTimeSource> {
    shared: Arc<Mutex<Shared>>,
    source: Arc<S>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl StopwatchEngine<SystemTimeSource> {
    /// Creates an engine reading the system clock.
    pub fn system(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self::new(Arc::new(SystemTimeSource), event_tx)
    }
}

impl<S: TimeSource> StopwatchEngine<S> {
    /// Creates a stopped engine.
    pub fn new(source: Arc<S>, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            source,
            event_tx,
        }
    }

    /// Starts or pauses the stopwatch.
    pub fn toggle_run(&self) -> RunState {
        let mut shared = lock(&self.shared);
        let state = shared.stopwatch.toggle_run(self.source.now_ms());
        let elapsed_ms = shared.stopwatch.elapsed_ms();

        match state {
            RunState::Running => {
                self.start_ticker(&mut shared.ticker);
                debug!(elapsed_ms, "Stopwatch started");
                emit(&self.event_tx, TimerEvent::StopwatchStarted { elapsed_ms });
            }
            RunState::Stopped => {
                shared.ticker.cancel();
                debug!(elapsed_ms, "Stopwatch paused");
                emit(&self.event_tx, TimerEvent::StopwatchPaused { elapsed_ms });
            }
        }
        state
    }

    /// Records a lap. Does nothing while stopped.
    pub fn lap(&self) -> Option<Lap> {
        let mut shared = lock(&self.shared);
        let lap = shared.stopwatch.lap()?;
        emit(
            &self.event_tx,
            TimerEvent::LapRecorded {
                number: shared.stopwatch.laps().len(),
                elapsed_ms: lap.elapsed_ms,
            },
        );
        Some(lap)
    }

    /// Stops the stopwatch and clears elapsed time and laps.
    pub fn reset(&self) {
        let mut shared = lock(&self.shared);
        shared.ticker.cancel();
        shared.stopwatch.reset();
        debug!("Stopwatch reset");
        emit(&self.event_tx, TimerEvent::StopwatchReset);
    }

    /// Returns a copy of the current stopwatch state.
    pub fn snapshot(&self) -> Stopwatch {
        lock(&self.shared).stopwatch.clone()
    }

    /// Returns true while a ticker is installed and live.
    pub fn is_ticking(&self) -> bool {
        lock(&self.shared).ticker.is_active()
    }

    fn start_ticker(&self, slot: &mut TickerSlot) {
        // The ticker only holds a weak reference so a dropped engine is
        // never kept alive by its own loop.
        let shared: Weak<Mutex<Shared>> = Arc::downgrade(&self.shared);
        let source = Arc::clone(&self.source);
        let event_tx = self.event_tx.clone();

        slot.start(STOPWATCH_TICK, move |token| {
            let Some(shared) = shared.upgrade() else {
                return TickFlow::Break;
            };
            let mut shared = lock(&shared);
            if token.is_cancelled() {
                return TickFlow::Break;
            }
            let elapsed_ms = shared.stopwatch.tick(source.now_ms());
            emit(&event_tx, TimerEvent::StopwatchTick { elapsed_ms });
            TickFlow::Continue
        });
    }
}
