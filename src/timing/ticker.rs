//! Cancellable periodic callbacks.
//!
//! A [`Ticker`] runs a callback on the tokio runtime every `period` until
//! it is cancelled or the callback asks to stop. A [`TickerSlot`] owns at
//! most one ticker, so restarting a timer can never leave two loops
//! advancing the same state.
//!
//! Cancellation is cooperative and immediate: the callback receives the
//! ticker's [`CancelToken`], and callers that check the token under the
//! same lock they cancel with are guaranteed that no further mutation
//! happens once `cancel` returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::trace;

// ============================================================================
// CancelToken
// ============================================================================

/// Shared cancellation flag for one ticker instance.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled. Calling this more than once is a no-op.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true once `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What the ticker loop should do after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    /// Keep ticking
    Continue,
    /// Stop the loop
    Break,
}

// ============================================================================
// Ticker
// ============================================================================

/// A periodic callback running as a tokio task.
///
/// Dropping a ticker cancels it.
#[derive(Debug)]
pub struct Ticker {
    token: CancelToken,
    handle: JoinHandle<()>,
    period: Duration,
}

impl Ticker {
    /// Spawns a ticker that first fires one `period` from now.
    ///
    /// Late ticks are skipped rather than fired in a burst.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero or if called outside a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(&CancelToken) -> TickFlow + Send + 'static,
    {
        let token = CancelToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                if task_token.is_cancelled() {
                    break;
                }
                if on_tick(&task_token) == TickFlow::Break {
                    break;
                }
            }

            trace!(period_ms = period.as_millis() as u64, "ticker loop finished");
        });

        Self {
            token,
            handle,
            period,
        }
    }

    /// Cancels the ticker. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
        self.handle.abort();
    }

    /// Returns a clone of this ticker's cancellation token.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true if the ticker is neither cancelled nor finished.
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ============================================================================
// TickerSlot
// ============================================================================

/// Holds the single active ticker of one logical timer.
#[derive(Debug, Default)]
pub struct TickerSlot {
    active: Option<Ticker>,
}

impl TickerSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any running ticker, then spawns a new one in its place.
    pub fn start<F>(&mut self, period: Duration, on_tick: F)
    where
        F: FnMut(&CancelToken) -> TickFlow + Send + 'static,
    {
        self.cancel();
        self.active = Some(Ticker::spawn(period, on_tick));
    }

    /// Cancels the running ticker, returning true if there was one.
    ///
    /// Cancelling an empty slot is a no-op.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(ticker) => {
                ticker.cancel();
                true
            }
            None => false,
        }
    }

    /// Returns true if the slot holds a live ticker.
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(Ticker::is_active)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting(counter: &Arc<AtomicUsize>) -> impl FnMut(&CancelToken) -> TickFlow + Send + 'static {
        let counter = counter.clone();
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            TickFlow::Continue
        }
    }

    mod cancel_token_tests {
        use super::*;

        #[test]
        fn test_new_token_not_cancelled() {
            assert!(!CancelToken::new().is_cancelled());
        }

        #[test]
        fn test_cancel_is_idempotent() {
            let token = CancelToken::new();
            token.cancel();
            token.cancel();
            assert!(token.is_cancelled());
        }

        #[test]
        fn test_clones_share_state() {
            let token = CancelToken::new();
            let clone = token.clone();
            clone.cancel();
            assert!(token.is_cancelled());
        }
    }

    mod ticker_tests {
        use super::*;

        #[tokio::test]
        async fn test_first_tick_waits_one_period() {
            let counter = Arc::new(AtomicUsize::new(0));
            let ticker = Ticker::spawn(Duration::from_millis(200), counting(&counter));

            tokio::time::sleep(Duration::from_millis(50)).await;
            assert_eq!(counter.load(Ordering::SeqCst), 0);

            ticker.cancel();
        }

        #[tokio::test]
        async fn test_ticks_repeatedly() {
            let counter = Arc::new(AtomicUsize::new(0));
            let ticker = Ticker::spawn(Duration::from_millis(20), counting(&counter));

            tokio::time::sleep(Duration::from_millis(230)).await;
            ticker.cancel();

            let ticks = counter.load(Ordering::SeqCst);
            assert!((5..=12).contains(&ticks), "Expected ~11 ticks, got {}", ticks);
        }

        #[tokio::test]
        async fn test_cancel_stops_ticks() {
            let counter = Arc::new(AtomicUsize::new(0));
            let ticker = Ticker::spawn(Duration::from_millis(20), counting(&counter));

            tokio::time::sleep(Duration::from_millis(70)).await;
            ticker.cancel();
            ticker.cancel();
            let after_cancel = counter.load(Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(100)).await;
            assert_eq!(counter.load(Ordering::SeqCst), after_cancel);
            assert!(!ticker.is_active());
        }

        #[tokio::test]
        async fn test_break_ends_loop() {
            let counter = Arc::new(AtomicUsize::new(0));
            let inner = counter.clone();
            let ticker = Ticker::spawn(Duration::from_millis(10), move |_| {
                inner.fetch_add(1, Ordering::SeqCst);
                TickFlow::Break
            });

            tokio::time::sleep(Duration::from_millis(100)).await;
            assert_eq!(counter.load(Ordering::SeqCst), 1);
            assert!(!ticker.is_active());
        }

        #[tokio::test]
        async fn test_drop_cancels() {
            let counter = Arc::new(AtomicUsize::new(0));
            let ticker = Ticker::spawn(Duration::from_millis(10), counting(&counter));
            let token = ticker.token();
            drop(ticker);

            assert!(token.is_cancelled());
            tokio::time::sleep(Duration::from_millis(60)).await;
            assert_eq!(counter.load(Ordering::SeqCst), 0);
        }
    }

    mod slot_tests {
        use super::*;

        #[test]
        fn test_cancel_empty_slot_is_noop() {
            let mut slot = TickerSlot::new();
            assert!(!slot.cancel());
            assert!(!slot.is_active());
        }

        #[tokio::test]
        async fn test_restart_replaces_previous_ticker() {
            let first = Arc::new(AtomicUsize::new(0));
            let second = Arc::new(AtomicUsize::new(0));
            let mut slot = TickerSlot::new();

            slot.start(Duration::from_millis(10), counting(&first));
            tokio::time::sleep(Duration::from_millis(45)).await;
            slot.start(Duration::from_millis(10), counting(&second));
            let first_frozen = first.load(Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(60)).await;
            assert_eq!(first.load(Ordering::SeqCst), first_frozen);
            assert!(second.load(Ordering::SeqCst) > 0);
            assert!(slot.is_active());

            assert!(slot.cancel());
            assert!(!slot.is_active());
        }
    }
}
