//! clockdeck library
//!
//! This library provides the core functionality for the clockdeck CLI.
//! It includes:
//! - Time formatting, interval tickers, stopwatch and countdown state machines
//! - Async timer engines reporting events over channels
//! - Timezone-aware clock display and world clocks
//! - Weather, quote and location services with fallbacks
//! - Ambient drone synthesis
//! - View state, themes and command parsing
//! - The interactive dashboard runtime and CLI

pub mod alert;
pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod services;
pub mod shell;
pub mod sound;
pub mod timing;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ClockMode, Coordinates, QuoteData, RunState, Tab, WeatherData, WorldCity};

pub use alert::{AlertSink, MockAlertSink, SilentAlert, TerminalBell};
pub use app::{App, Flow, Frame};
pub use clock::{ClockDisplay, ClockFields, HandAngles, TimeOfDay};
pub use config::{AppConfig, ConfigError, ServiceConfig};
pub use engine::{CountdownEngine, StopwatchEngine, TimerEvent};
pub use services::{
    GeminiQuoteClient, LocationSource, OpenMeteoClient, PanelUpdate, QuoteProvider, ServiceError,
    WeatherProvider,
};
pub use shell::{Command, ShellState, SwipeTracker};
pub use sound::{AmbientBackend, AmbientSound, MockAmbientBackend, SoundError};
pub use timing::{Countdown, Stopwatch, TimeSource};
