//! Countdown timer state machine.
//!
//! ```text
//! STOPPED --start--> RUNNING --pause--> STOPPED
//! RUNNING --tick, remaining hits 0--> STOPPED (terminal)
//! STOPPED (terminal) --reset--> STOPPED (duration)
//! STOPPED (any) --configure--> STOPPED (new duration)
//! ```
//!
//! Each tick subtracts exactly one second regardless of how late it fires.

use serde::{Deserialize, Serialize};

use super::format::format_countdown;
use crate::types::RunState;

/// Default countdown length: five minutes.
pub const DEFAULT_DURATION_MS: u64 = 5 * 60 * 1000;

/// Amount subtracted per tick.
pub const TICK_MS: u64 = 1000;

/// Result of a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running; nothing changed
    Idle,
    /// One second was subtracted
    Counting { remaining_ms: u64 },
    /// Remaining time reached zero and the timer stopped
    Completed,
}

/// Countdown timer with a user-configurable duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    state: RunState,
    duration_ms: u64,
    remaining_ms: u64,
    editing: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DURATION_MS)
    }
}

impl Countdown {
    /// Creates a stopped countdown with the default five minute duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopped countdown with the given duration.
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            state: RunState::Stopped,
            duration_ms,
            remaining_ms: duration_ms,
            editing: false,
        }
    }

    /// Converts user-entered minutes and seconds to a duration.
    ///
    /// Negative minutes become zero and seconds are clamped to `0..=59`.
    pub fn clamp_input(minutes: i64, seconds: i64) -> u64 {
        let minutes = minutes.max(0) as u64;
        let seconds = seconds.clamp(0, 59) as u64;
        minutes
            .saturating_mul(60_000)
            .saturating_add(seconds * 1000)
    }

    /// Enters edit mode. Only allowed while stopped.
    pub fn begin_edit(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.editing = true;
        true
    }

    /// Sets a new duration and refills the remaining time.
    ///
    /// Refused (returns false) while running.
    pub fn configure(&mut self, minutes: i64, seconds: i64) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.duration_ms = Self::clamp_input(minutes, seconds);
        self.remaining_ms = self.duration_ms;
        self.editing = false;
        true
    }

    /// Returns true if `toggle_run` would have an effect.
    pub fn can_toggle(&self) -> bool {
        self.state.is_running() || self.remaining_ms > 0
    }

    /// Starts or pauses the countdown.
    ///
    /// A completed countdown cannot be started again until it is reset or
    /// reconfigured; in that case the state is returned unchanged.
    pub fn toggle_run(&mut self) -> RunState {
        if !self.can_toggle() {
            return self.state;
        }
        self.state = match self.state {
            RunState::Stopped => {
                self.editing = false;
                RunState::Running
            }
            RunState::Running => RunState::Stopped,
        };
        self.state
    }

    /// Advances the countdown by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }
        if self.remaining_ms <= TICK_MS {
            self.remaining_ms = 0;
            self.state = RunState::Stopped;
            return TickOutcome::Completed;
        }
        self.remaining_ms -= TICK_MS;
        TickOutcome::Counting {
            remaining_ms: self.remaining_ms,
        }
    }

    /// Stops the countdown and refills it from the configured duration.
    pub fn reset(&mut self) {
        self.state = RunState::Stopped;
        self.remaining_ms = self.duration_ms;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Returns true in the terminal state: zero remaining and stopped.
    pub fn is_finished(&self) -> bool {
        self.remaining_ms == 0 && !self.state.is_running()
    }

    /// Fraction of the duration still remaining, in `[0, 1]`.
    ///
    /// A zero duration reports `0.0`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Returns the remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_countdown(self.remaining_ms)
    }
}
