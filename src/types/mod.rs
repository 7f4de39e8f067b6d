//! Core data types for clockdeck.
//!
//! This module defines the data structures shared across subsystems:
//! - Run state of the stopwatch and countdown timer
//! - View state (tabs, clock mode)
//! - Payloads of the external weather, quote and location services

use serde::{Deserialize, Serialize};

// ============================================================================
// RunState
// ============================================================================

/// Whether a stopwatch or countdown timer is ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Not ticking; accumulated or remaining time is retained
    #[default]
    Stopped,
    /// Ticking
    Running,
}

impl RunState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
        }
    }

    /// Returns true if the state is `Running`.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

// ============================================================================
// Tab
// ============================================================================

/// The view currently shown by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Target-timezone clock plus world clocks
    #[default]
    Clock,
    /// Stopwatch with laps
    Stopwatch,
    /// Countdown timer
    Timer,
}

impl Tab {
    /// All tabs in navigation order.
    pub const ALL: [Tab; 3] = [Tab::Clock, Tab::Stopwatch, Tab::Timer];

    /// Returns the position of this tab in navigation order.
    pub fn index(&self) -> usize {
        match self {
            Tab::Clock => 0,
            Tab::Stopwatch => 1,
            Tab::Timer => 2,
        }
    }

    /// Returns the tab to the right, or `None` at the last tab.
    pub fn next(&self) -> Option<Tab> {
        Tab::ALL.get(self.index() + 1).copied()
    }

    /// Returns the tab to the left, or `None` at the first tab.
    pub fn prev(&self) -> Option<Tab> {
        self.index().checked_sub(1).map(|i| Tab::ALL[i])
    }

    /// Label shown in the tab bar.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Clock => "World",
            Tab::Stopwatch => "Stopwatch",
            Tab::Timer => "Timer",
        }
    }
}

// ============================================================================
// ClockMode
// ============================================================================

/// How the target-timezone clock is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    #[default]
    Digital,
    Analog,
}

impl ClockMode {
    /// Returns the other mode.
    pub fn toggled(&self) -> ClockMode {
        match self {
            ClockMode::Digital => ClockMode::Analog,
            ClockMode::Analog => ClockMode::Digital,
        }
    }
}

// ============================================================================
// Service payloads
// ============================================================================

/// Current weather at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// WMO weather interpretation code
    pub condition_code: i32,
    /// Whether the sun is up at the location
    pub is_day: bool,
}

impl WeatherData {
    /// Value shown when the weather service cannot be reached.
    pub const FALLBACK: WeatherData = WeatherData {
        temperature: 20.0,
        condition_code: 0,
        is_day: true,
    };
}

/// A short quote with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteData {
    pub text: String,
    pub author: String,
}

impl QuoteData {
    /// Creates a new quote.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Placeholder shown until the quote service answers.
    pub fn loading() -> Self {
        Self::new("Loading inspiration...", "")
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// London, used when no location is available.
    pub const DEFAULT: Coordinates = Coordinates {
        latitude: 51.5074,
        longitude: -0.1278,
    };

    /// Creates a new coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are within their valid ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A city shown in the world clock list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldCity {
    /// Display name
    pub name: String,
    /// IANA timezone identifier (e.g. `Asia/Tokyo`)
    pub timezone: String,
    /// Display glyph, usually a flag emoji
    #[serde(default)]
    pub flag: String,
}

impl WorldCity {
    /// Creates a new city entry.
    pub fn new(name: impl Into<String>, timezone: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: timezone.into(),
            flag: flag.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
