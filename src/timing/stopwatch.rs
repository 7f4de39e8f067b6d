//! Stopwatch state machine.
//!
//! Elapsed time is derived from a captured start timestamp on every tick
//! (`now - start`), so late or skipped ticks never accumulate error.

use serde::{Deserialize, Serialize};

use super::format::format_stopwatch;
use crate::types::RunState;

/// Snapshot of the elapsed time at the moment a lap was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// Elapsed milliseconds when the lap was recorded
    pub elapsed_ms: u64,
}

impl Lap {
    /// Returns the lap time as `MM:SS.CC`.
    pub fn display(&self) -> String {
        format_stopwatch(self.elapsed_ms)
    }
}

/// Start/pause/lap/reset stopwatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    state: RunState,
    elapsed_ms: u64,
    /// Wall-clock ms at which an uninterrupted run would have started
    start_ms: u64,
    /// Most recent first
    laps: Vec<Lap>,
}

impl Stopwatch {
    /// Creates a stopped stopwatch at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts or pauses the stopwatch. Returns the new state.
    ///
    /// Starting resumes from the current elapsed time. Pausing freezes the
    /// elapsed time at the last ticked value.
    pub fn toggle_run(&mut self, now_ms: u64) -> RunState {
        self.state = match self.state {
            RunState::Stopped => {
                self.start_ms = now_ms.saturating_sub(self.elapsed_ms);
                RunState::Running
            }
            RunState::Running => RunState::Stopped,
        };
        self.state
    }

    /// Recomputes elapsed time from `now_ms`. Ignored while stopped.
    ///
    /// Elapsed time never decreases while running, even if the wall clock
    /// steps backwards.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        if self.state.is_running() {
            let elapsed = now_ms.saturating_sub(self.start_ms);
            self.elapsed_ms = self.elapsed_ms.max(elapsed);
        }
        self.elapsed_ms
    }

    /// Records a lap. Returns the lap, or `None` while stopped.
    pub fn lap(&mut self) -> Option<Lap> {
        if !self.state.is_running() {
            return None;
        }
        let lap = Lap {
            elapsed_ms: self.elapsed_ms,
        };
        self.laps.insert(0, lap);
        Some(lap)
    }

    /// Stops the stopwatch and clears elapsed time and laps.
    pub fn reset(&mut self) {
        self.state = RunState::Stopped;
        self.elapsed_ms = 0;
        self.start_ms = 0;
        self.laps.clear();
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Recorded laps, most recent first.
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Returns the elapsed time as `MM:SS.CC`.
    pub fn display(&self) -> String {
        format_stopwatch(self.elapsed_ms)
    }
}
