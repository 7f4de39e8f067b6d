//! Command definitions for the clockdeck CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::Tab;

// ============================================================================
// CLI Structure
// ============================================================================

/// clockdeck - a terminal clock dashboard
#[derive(Parser, Debug)]
#[command(
    name = "clockdeck",
    version,
    about = "Terminal clock dashboard with world clocks, stopwatch and countdown timer",
    long_about = "A clock dashboard for the terminal: a digital or analog clock for a chosen \
                  timezone, world clocks, a stopwatch with laps, a countdown timer, themes, \
                  an ambient drone, and weather and quote panels.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive dashboard
    Dashboard(DashboardArgs),

    /// Print the current time in a timezone
    Clock(ClockArgs),

    /// Print the world clocks
    World,

    /// Print the current weather
    Weather(WeatherArgs),

    /// Print a motivational quote for the current time and weather
    Quote,

    /// List the available themes
    Themes,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Tab names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    #[value(alias = "clock")]
    World,
    Stopwatch,
    Timer,
}

impl From<TabArg> for Tab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::World => Tab::Clock,
            TabArg::Stopwatch => Tab::Stopwatch,
            TabArg::Timer => Tab::Timer,
        }
    }
}

// ============================================================================
// Command Arguments
// ============================================================================

/// Arguments for the dashboard command
#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// Tab shown at startup
    #[arg(short, long, value_enum)]
    pub tab: Option<TabArg>,

    /// Start with the analog clock
    #[arg(short, long)]
    pub analog: bool,

    /// Do not contact the weather or quote services
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the clock command
#[derive(Args, Debug, Clone, Default)]
pub struct ClockArgs {
    /// IANA timezone, e.g. Europe/Paris (defaults to the configured one)
    #[arg(long, value_name = "TZ")]
    pub tz: Option<String>,

    /// Draw an analog dial instead of the digital time
    #[arg(short, long)]
    pub analog: bool,
}

/// Arguments for the weather command
#[derive(Args, Debug, Clone, Default)]
pub struct WeatherArgs {
    /// Latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_negative_numbers = true, value_parser = parse_latitude, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_negative_numbers = true, value_parser = parse_longitude, requires = "lat")]
    pub lon: Option<f64>,
}

// ============================================================================
// Validation Functions
// ============================================================================

fn parse_degrees(s: &str, limit: f64) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(-limit..=limit).contains(&value) {
        return Err(format!("must be between -{} and {}", limit, limit));
    }
    Ok(value)
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, 90.0)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, 180.0)
}

// ============================================================================
// Tests
// ============================================================================
