//! Time keeping primitives.
//!
//! - `format`: display strings for elapsed and remaining time
//! - `source`: wall-clock time source abstraction
//! - `ticker`: cancellable periodic callbacks on the tokio runtime
//! - `stopwatch`: stopwatch state machine
//! - `countdown`: countdown timer state machine
//!
//! The state machines are pure: they never read the clock themselves and
//! never spawn tasks. The `engine` module binds them to tickers.

pub mod countdown;
pub mod format;
pub mod source;
pub mod stopwatch;
pub mod ticker;

pub use countdown::{Countdown, TickOutcome, DEFAULT_DURATION_MS};
pub use format::{format_countdown, format_stopwatch};
pub use source::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use stopwatch::{Lap, Stopwatch};
pub use ticker::{CancelToken, TickFlow, Ticker, TickerSlot};
