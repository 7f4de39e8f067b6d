//! CLI module for clockdeck.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and rendering

pub mod commands;
pub mod display;

pub use commands::{ClockArgs, Cli, Commands, DashboardArgs, TabArg, WeatherArgs};
pub use display::Display;
