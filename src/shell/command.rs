//! User commands and their sources.
//!
//! Keyboard lines and swipe gestures both reduce to a [`Command`]; the
//! runtime dispatches on commands only.

use std::fmt;

use crate::types::Tab;

/// Minimum horizontal travel of a swipe, in pixels.
pub const SWIPE_THRESHOLD: i32 = 50;

// ============================================================================
// Command
// ============================================================================

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextTab,
    PrevTab,
    SelectTab(Tab),
    /// Start or pause the stopwatch or timer, by active tab
    ToggleRun,
    Lap,
    /// Reset the stopwatch or timer, by active tab
    Reset,
    EditTimer,
    ConfigureTimer { minutes: i64, seconds: i64 },
    ToggleClockMode,
    ToggleDark,
    ToggleThemeMenu,
    SelectTheme(String),
    ToggleSound,
    Swipe { from_x: i32, to_x: i32 },
    Help,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NextTab => write!(f, "next-tab"),
            Command::PrevTab => write!(f, "prev-tab"),
            Command::SelectTab(tab) => write!(f, "select-tab {}", tab.label()),
            Command::ToggleRun => write!(f, "toggle-run"),
            Command::Lap => write!(f, "lap"),
            Command::Reset => write!(f, "reset"),
            Command::EditTimer => write!(f, "edit-timer"),
            Command::ConfigureTimer { minutes, seconds } => {
                write!(f, "configure-timer {}:{:02}", minutes, seconds)
            }
            Command::ToggleClockMode => write!(f, "toggle-clock-mode"),
            Command::ToggleDark => write!(f, "toggle-dark"),
            Command::ToggleThemeMenu => write!(f, "toggle-theme-menu"),
            Command::SelectTheme(id) => write!(f, "select-theme {}", id),
            Command::ToggleSound => write!(f, "toggle-sound"),
            Command::Swipe { from_x, to_x } => write!(f, "swipe {} {}", from_x, to_x),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

/// Keyboard reference shown by `help`.
pub const KEY_HELP: &[(&str, &str)] = &[
    ("n / p", "next / previous tab"),
    ("1 2 3", "world, stopwatch, timer tab"),
    ("space", "start or pause"),
    ("l", "lap"),
    ("r", "reset"),
    ("e", "edit timer"),
    ("set M S", "set timer to M minutes S seconds"),
    ("a", "toggle analog clock"),
    ("d", "toggle dark mode"),
    ("t", "theme menu"),
    ("theme ID", "select theme"),
    ("m", "toggle ambient sound"),
    ("swipe X1 X2", "horizontal swipe from X1 to X2"),
    ("q", "quit"),
];

/// Parses one line typed in the terminal.
///
/// An empty line (a bare Enter) and a single space both toggle run.
pub fn parse_command(line: &str) -> Option<Command> {
    if line.trim().is_empty() {
        return Some(Command::ToggleRun);
    }

    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match (head.as_str(), args.as_slice()) {
        ("n" | "next", []) => Command::NextTab,
        ("p" | "prev", []) => Command::PrevTab,
        ("1" | "world" | "clock", []) => Command::SelectTab(Tab::Clock),
        ("2" | "stopwatch", []) => Command::SelectTab(Tab::Stopwatch),
        ("3" | "timer", []) => Command::SelectTab(Tab::Timer),
        ("s" | "start" | "pause" | "toggle", []) => Command::ToggleRun,
        ("l" | "lap", []) => Command::Lap,
        ("r" | "reset", []) => Command::Reset,
        ("e" | "edit", []) => Command::EditTimer,
        ("set", [minutes]) => Command::ConfigureTimer {
            minutes: minutes.parse().ok()?,
            seconds: 0,
        },
        ("set", [minutes, seconds]) => Command::ConfigureTimer {
            minutes: minutes.parse().ok()?,
            seconds: seconds.parse().ok()?,
        },
        ("a" | "analog" | "digital", []) => Command::ToggleClockMode,
        ("d" | "dark" | "light", []) => Command::ToggleDark,
        ("t" | "themes", []) => Command::ToggleThemeMenu,
        ("theme", [id]) => Command::SelectTheme(id.to_ascii_lowercase()),
        ("m" | "music" | "sound", []) => Command::ToggleSound,
        ("swipe", [from, to]) => Command::Swipe {
            from_x: from.parse().ok()?,
            to_x: to.parse().ok()?,
        },
        ("h" | "help" | "?", []) => Command::Help,
        ("q" | "quit" | "exit", []) => Command::Quit,
        _ => return None,
    };
    Some(command)
}

// ============================================================================
// Swipe
// ============================================================================

/// Direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left; shows the next tab
    Left,
    /// Finger moved right; shows the previous tab
    Right,
}

impl SwipeDirection {
    /// Classifies a horizontal movement. Travel of exactly the threshold is
    /// not a swipe.
    pub fn classify(from_x: i32, to_x: i32) -> Option<Self> {
        let distance = i64::from(from_x) - i64::from(to_x);
        let threshold = i64::from(SWIPE_THRESHOLD);
        if distance > threshold {
            Some(SwipeDirection::Left)
        } else if distance < -threshold {
            Some(SwipeDirection::Right)
        } else {
            None
        }
    }

    /// Tab shown after swiping from `current`; `None` at either end.
    pub fn apply(&self, current: Tab) -> Option<Tab> {
        match self {
            SwipeDirection::Left => current.next(),
            SwipeDirection::Right => current.prev(),
        }
    }
}

/// Tracks one touch gesture from start to end.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<i32>,
    end_x: Option<i32>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finger touched down; any previous gesture is discarded.
    pub fn touch_start(&mut self, x: i32) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    pub fn touch_move(&mut self, x: i32) {
        self.end_x = Some(x);
    }

    /// The finger lifted. A gesture without a start or any movement yields
    /// nothing.
    pub fn touch_end(&mut self) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let end = self.end_x.take()?;
        SwipeDirection::classify(start, end)
    }
}
