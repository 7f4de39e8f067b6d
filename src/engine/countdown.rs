//! Countdown engine.

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, info};

use super::{emit, lock, TimerEvent};
use crate::alert::AlertSink;
use crate::timing::{Countdown, TickFlow, TickOutcome, TickerSlot};
use crate::types::RunState;

/// Countdown tick period. Each tick subtracts exactly this much.
pub const COUNTDOWN_TICK: Duration = Duration::from_millis(1000);

#[derive(Debug, Default)]
struct Shared {
    countdown: Countdown,
    ticker: TickerSlot,
}

/// Runs a [`Countdown`] on a 1 s ticker and reports [`TimerEvent`]s.
///
/// When the countdown reaches zero the ticker stops, the alert sink is
/// notified once and [`TimerEvent::CountdownCompleted`] is emitted.
pub struct CountdownEngine {
    shared: Arc<Mutex<Shared>>,
    alert: Arc<dyn AlertSink>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl CountdownEngine {
    /// Creates a stopped engine around `countdown`.
    pub fn new(
        countdown: Countdown,
        alert: Arc<dyn AlertSink>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                countdown,
                ticker: TickerSlot::new(),
            })),
            alert,
            event_tx,
        }
    }

    /// Enters edit mode. Only allowed while stopped.
    pub fn begin_edit(&self) -> bool {
        lock(&self.shared).countdown.begin_edit()
    }

    /// Sets a new duration. Refused while running.
    pub fn configure(&self, minutes: i64, seconds: i64) -> bool {
        let mut shared = lock(&self.shared);
        if !shared.countdown.configure(minutes, seconds) {
            debug!("Countdown configure refused while running");
            return false;
        }
        let duration_ms = shared.countdown.duration_ms();
        debug!(duration_ms, "Countdown configured");
        emit(&self.event_tx, TimerEvent::CountdownConfigured { duration_ms });
        true
    }

    /// Starts or pauses the countdown.
    ///
    /// A finished countdown stays stopped and emits nothing.
    pub fn toggle_run(&self) -> RunState {
        let mut shared = lock(&self.shared);
        if !shared.countdown.can_toggle() {
            return shared.countdown.state();
        }

        let state = shared.countdown.toggle_run();
        let remaining_ms = shared.countdown.remaining_ms();
        match state {
            RunState::Running => {
                self.start_ticker(&mut shared.ticker);
                debug!(remaining_ms, "Countdown started");
                emit(&self.event_tx, TimerEvent::CountdownStarted { remaining_ms });
            }
            RunState::Stopped => {
                shared.ticker.cancel();
                debug!(remaining_ms, "Countdown paused");
                emit(&self.event_tx, TimerEvent::CountdownPaused { remaining_ms });
            }
        }
        state
    }

    /// Stops the countdown and refills it from its duration.
    pub fn reset(&self) {
        let mut shared = lock(&self.shared);
        shared.ticker.cancel();
        shared.countdown.reset();
        let remaining_ms = shared.countdown.remaining_ms();
        debug!(remaining_ms, "Countdown reset");
        emit(&self.event_tx, TimerEvent::CountdownReset { remaining_ms });
    }

    /// Returns a copy of the current countdown state.
    pub fn snapshot(&self) -> Countdown {
        lock(&self.shared).countdown.clone()
    }

    /// Returns true while a ticker is installed and live.
    pub fn is_ticking(&self) -> bool {
        lock(&self.shared).ticker.is_active()
    }

    fn start_ticker(&self, slot: &mut TickerSlot) {
        let shared: Weak<Mutex<Shared>> = Arc::downgrade(&self.shared);
        let alert = Arc::clone(&self.alert);
        let event_tx = self.event_tx.clone();

        slot.start(COUNTDOWN_TICK, move |token| {
            let Some(shared) = shared.upgrade() else {
                return TickFlow::Break;
            };
            let mut guard = lock(&shared);
            if token.is_cancelled() {
                return TickFlow::Break;
            }

            match guard.countdown.tick() {
                TickOutcome::Counting { remaining_ms } => {
                    emit(&event_tx, TimerEvent::CountdownTick { remaining_ms });
                    TickFlow::Continue
                }
                TickOutcome::Completed => {
                    drop(guard);
                    info!("Countdown completed");
                    emit(&event_tx, TimerEvent::CountdownTick { remaining_ms: 0 });
                    emit(&event_tx, TimerEvent::CountdownCompleted);
                    alert.countdown_finished();
                    TickFlow::Break
                }
                TickOutcome::Idle => TickFlow::Break,
            }
        });
    }
}
