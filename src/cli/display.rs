//! Display utilities for the clockdeck CLI.
//!
//! Every renderer returns a `String` so frames can be tested without a
//! terminal; printing happens at the call site.

use std::fmt::Write as _;

use crate::app::Frame;
use crate::clock::{CityRow, HandAngles};
use crate::shell::{Appearance, Theme, KEY_HELP, THEMES};
use crate::timing::{format_countdown, Countdown, Stopwatch};
use crate::types::{ClockMode, QuoteData, Tab};

/// Width of the analog dial in columns.
const DIAL_WIDTH: usize = 23;
/// Height of the analog dial in rows.
const DIAL_HEIGHT: usize = 11;
/// Width of the countdown progress bar.
const PROGRESS_WIDTH: usize = 32;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn accent(code: u8) -> String {
    format!("\x1b[38;5;{}m", code)
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders one full dashboard frame.
    pub fn render_frame(frame: &Frame) -> String {
        let color = accent(frame.appearance.accent());
        let mut out = String::new();

        // header
        let _ = writeln!(
            out,
            "{color}{BOLD}clockdeck{RESET}   {DIM}{} live · {} · {}{}{RESET}",
            frame.visitors,
            Self::appearance_label(&frame.appearance),
            if frame.dark { "dark" } else { "light" },
            if frame.sound_on { " · ♪ on" } else { "" },
        );
        let _ = writeln!(
            out,
            "{} · {}",
            frame.date_line,
            frame.weather_line.as_deref().unwrap_or("Loading Weather...")
        );
        out.push('\n');

        // main clock
        match frame.clock_mode {
            ClockMode::Digital => {
                let _ = writeln!(out, "  {color}{BOLD}{}{RESET}", frame.digital);
            }
            ClockMode::Analog => {
                for line in Self::render_dial(&frame.hands) {
                    let _ = writeln!(out, "  {color}{}{RESET}", line);
                }
            }
        }
        let _ = writeln!(out, "  {DIM}{}{RESET}", frame.timezone_label);
        out.push('\n');

        out.push_str(&Self::render_quote(&frame.quote));
        out.push('\n');
        out.push_str(&Self::render_tab_bar(frame.tab, &color));
        out.push('\n');

        match frame.tab {
            Tab::Clock => out.push_str(&Self::render_world(&frame.world)),
            Tab::Stopwatch => out.push_str(&Self::render_stopwatch(&frame.stopwatch)),
            Tab::Timer => out.push_str(&Self::render_countdown(&frame.countdown)),
        }

        if frame.theme_menu_open {
            out.push('\n');
            out.push_str(&Self::render_themes(frame.theme_id));
        }
        if frame.help_open {
            out.push('\n');
            out.push_str(&Self::render_help());
        }
        if let Some(notice) = &frame.notice {
            let _ = writeln!(out, "\n{BOLD}{}{RESET}", notice);
        }
        let _ = write!(out, "\n{DIM}h for help, q to quit{RESET}\n> ");
        out
    }

    fn appearance_label(appearance: &Appearance) -> String {
        match appearance {
            Appearance::Theme(theme) => theme.name.to_string(),
            Appearance::Auto(backdrop) => format!("auto: {}", backdrop.label()),
        }
    }

    /// Tab bar with the active tab highlighted.
    pub fn render_tab_bar(active: Tab, color: &str) -> String {
        let mut out = String::new();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            if *tab == active {
                let _ = write!(out, "{color}{BOLD}[{} {}]{RESET} ", i + 1, tab.label());
            } else {
                let _ = write!(out, "{DIM} {} {} {RESET} ", i + 1, tab.label());
            }
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
        out
    }

    /// Quote panel, e.g. `"Keep going." — Ada`.
    pub fn render_quote(quote: &QuoteData) -> String {
        if quote.author.is_empty() {
            format!("  \"{}\"\n", quote.text)
        } else {
            format!("  \"{}\" — {}\n", quote.text, quote.author)
        }
    }

    /// World clock rows, one city per line.
    pub fn render_world(rows: &[CityRow]) -> String {
        let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for row in rows {
            let _ = writeln!(
                out,
                "  {} {:<width$}  {:>8}  {}",
                row.flag,
                row.name,
                row.time,
                if row.is_night { "☾ night" } else { "☀ day" },
                width = width
            );
        }
        out
    }

    /// Stopwatch panel with laps, most recent first.
    pub fn render_stopwatch(stopwatch: &Stopwatch) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "  {BOLD}{}{RESET}  {}",
            stopwatch.display(),
            if stopwatch.is_running() { "running" } else { "paused" }
        );
        let total = stopwatch.laps().len();
        for (index, lap) in stopwatch.laps().iter().enumerate() {
            let _ = writeln!(out, "  Lap {:<3} {}", total - index, lap.display());
        }
        let _ = writeln!(out, "  {DIM}space start/pause · l lap · r reset{RESET}");
        out
    }

    /// Countdown panel with its progress bar.
    pub fn render_countdown(countdown: &Countdown) -> String {
        let mut out = String::new();
        let state = if countdown.is_finished() {
            "done"
        } else if countdown.is_running() {
            "running"
        } else if countdown.is_editing() {
            "editing"
        } else {
            "paused"
        };
        let _ = writeln!(out, "  {BOLD}{}{RESET}  {}", countdown.display(), state);
        let _ = writeln!(out, "  {}", Self::progress_bar(countdown.progress()));
        if countdown.is_editing() {
            let _ = writeln!(
                out,
                "  set M S to change the duration (now {})",
                format_countdown(countdown.duration_ms())
            );
        }
        let _ = writeln!(out, "  {DIM}space start/pause · r reset · e edit{RESET}");
        out
    }

    /// Progress bar for a fraction in [0, 1].
    pub fn progress_bar(fraction: f64) -> String {
        let filled = (fraction.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round() as usize;
        format!(
            "[{}{}]",
            "█".repeat(filled),
            "·".repeat(PROGRESS_WIDTH - filled)
        )
    }

    /// Analog dial drawn with characters. Hour markers are `·`, the hour
    /// hand `#`, the minute hand `*` and the second hand `.`.
    pub fn render_dial(hands: &HandAngles) -> Vec<String> {
        let mut grid = vec![vec![' '; DIAL_WIDTH]; DIAL_HEIGHT];
        let cx = (DIAL_WIDTH / 2) as f64;
        let cy = (DIAL_HEIGHT / 2) as f64;
        let rx = cx - 1.0;
        let ry = cy;

        let plot = |deg: f64, length: f64, ch: char, grid: &mut [Vec<char>]| {
            let (sin, cos) = deg.to_radians().sin_cos();
            let x = (cx + sin * rx * length).round();
            let y = (cy - cos * ry * length).round();
            if (0.0..DIAL_WIDTH as f64).contains(&x) && (0.0..DIAL_HEIGHT as f64).contains(&y) {
                grid[y as usize][x as usize] = ch;
            }
        };

        for hour in 0..12 {
            plot(f64::from(hour) * 30.0, 1.0, '·', &mut grid);
        }
        for (deg, length, ch) in [
            (hands.second_deg, 0.9, '.'),
            (hands.minute_deg, 0.85, '*'),
            (hands.hour_deg, 0.55, '#'),
        ] {
            let steps = 8;
            for step in 1..=steps {
                plot(deg, length * f64::from(step) / f64::from(steps), ch, &mut grid);
            }
        }
        grid[cy as usize][cx as usize] = 'o';

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Theme list with the current theme marked.
    pub fn render_themes(current: &str) -> String {
        let mut out = String::new();
        let width = THEMES.iter().map(|t| t.id.len()).max().unwrap_or(0);
        for theme in &THEMES {
            let marker = if theme.id == current { "✓" } else { " " };
            let _ = writeln!(
                out,
                "  {} {}{:<width$}{}  {}{}",
                marker,
                accent(theme.accent),
                theme.id,
                RESET,
                theme.name,
                Self::gradient_suffix(theme),
                width = width
            );
        }
        out
    }

    fn gradient_suffix(theme: &Theme) -> String {
        if theme.gradient.is_empty() {
            String::new()
        } else {
            format!("  {DIM}{}{RESET}", theme.gradient.join(" → "))
        }
    }

    /// Keyboard reference.
    pub fn render_help() -> String {
        let mut out = String::new();
        for (keys, action) in KEY_HELP {
            let _ = writeln!(out, "  {:<12} {}", keys, action);
        }
        out
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
