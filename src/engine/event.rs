//! Events emitted by the timer engines.

/// Timer events for the dashboard and external integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Stopwatch started or resumed
    StopwatchStarted {
        /// Elapsed time carried over from earlier runs
        elapsed_ms: u64,
    },
    /// Stopwatch paused
    StopwatchPaused {
        /// Frozen elapsed time
        elapsed_ms: u64,
    },
    /// Stopwatch ticker fired
    StopwatchTick { elapsed_ms: u64 },
    /// A lap was recorded
    LapRecorded {
        /// 1-based lap number
        number: usize,
        elapsed_ms: u64,
    },
    /// Stopwatch cleared
    StopwatchReset,
    /// Countdown duration changed
    CountdownConfigured { duration_ms: u64 },
    /// Countdown started or resumed
    CountdownStarted { remaining_ms: u64 },
    /// Countdown paused
    CountdownPaused { remaining_ms: u64 },
    /// One second subtracted
    CountdownTick { remaining_ms: u64 },
    /// Countdown reached zero
    CountdownCompleted,
    /// Countdown refilled from its duration
    CountdownReset { remaining_ms: u64 },
}

impl TimerEvent {
    /// Returns true for events produced by the stopwatch.
    pub fn is_stopwatch(&self) -> bool {
        matches!(
            self,
            TimerEvent::StopwatchStarted { .. }
                | TimerEvent::StopwatchPaused { .. }
                | TimerEvent::StopwatchTick { .. }
                | TimerEvent::LapRecorded { .. }
                | TimerEvent::StopwatchReset
        )
    }

    /// Returns true for periodic tick events.
    pub fn is_tick(&self) -> bool {
        matches!(
            self,
            TimerEvent::StopwatchTick { .. } | TimerEvent::CountdownTick { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stopwatch() {
        assert!(TimerEvent::StopwatchReset.is_stopwatch());
        assert!(TimerEvent::LapRecorded {
            number: 1,
            elapsed_ms: 10
        }
        .is_stopwatch());
        assert!(!TimerEvent::CountdownCompleted.is_stopwatch());
    }

    #[test]
    fn test_is_tick() {
        assert!(TimerEvent::StopwatchTick { elapsed_ms: 10 }.is_tick());
        assert!(TimerEvent::CountdownTick { remaining_ms: 1000 }.is_tick());
        assert!(!TimerEvent::CountdownCompleted.is_tick());
    }

    #[test]
    fn test_event_debug() {
        let debug_str = format!("{:?}", TimerEvent::CountdownCompleted);
        assert_eq!(debug_str, "CountdownCompleted");
    }
}
