//! View/theme shell.
//!
//! Holds the view state of the dashboard (active tab, clock mode, theme,
//! dark mode, menus) and applies the [`Command`]s that only touch view
//! state. Timer commands are routed by the runtime.

mod command;
mod theme;
mod visitors;

pub use command::{parse_command, Command, SwipeDirection, SwipeTracker, KEY_HELP, SWIPE_THRESHOLD};
pub use theme::{find_theme, Backdrop, Theme, AUTO_THEME, THEMES};
pub use visitors::{VisitorCounter, INITIAL_VISITORS};

use tracing::debug;

use crate::types::{ClockMode, Tab};

/// Look of the dashboard background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Theme(&'static Theme),
    Auto(Backdrop),
}

impl Appearance {
    pub fn label(&self) -> &'static str {
        match self {
            Appearance::Theme(theme) => theme.name,
            Appearance::Auto(backdrop) => backdrop.label(),
        }
    }

    pub fn accent(&self) -> u8 {
        match self {
            Appearance::Theme(theme) => theme.accent,
            Appearance::Auto(backdrop) => backdrop.accent(),
        }
    }

    pub fn gradient(&self) -> &'static [&'static str] {
        match self {
            Appearance::Theme(theme) => theme.gradient,
            Appearance::Auto(backdrop) => backdrop.gradient(),
        }
    }
}

/// View state of the dashboard.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub tab: Tab,
    pub clock_mode: ClockMode,
    pub dark: bool,
    pub theme: &'static Theme,
    pub theme_menu_open: bool,
    pub help_open: bool,
    pub visitors: VisitorCounter,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            tab: Tab::Clock,
            clock_mode: ClockMode::Digital,
            dark: true,
            theme: &THEMES[0],
            theme_menu_open: false,
            help_open: false,
            visitors: VisitorCounter::new(),
        }
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Background for a local hour.
    pub fn appearance(&self, hour: u32) -> Appearance {
        if self.theme.is_auto() {
            Appearance::Auto(Backdrop::auto(self.dark, hour))
        } else {
            Appearance::Theme(self.theme)
        }
    }

    /// Switches to the theme with the given id. Unknown ids are ignored.
    pub fn select_theme(&mut self, id: &str) -> bool {
        match find_theme(id) {
            Some(theme) => {
                debug!("Theme selected: {}", theme.id);
                self.theme = theme;
                true
            }
            None => {
                debug!("Ignoring unknown theme '{}'", id);
                false
            }
        }
    }

    /// Applies a view-only command. Returns false for commands this state
    /// does not handle.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::NextTab => {
                if let Some(tab) = self.tab.next() {
                    self.tab = tab;
                }
            }
            Command::PrevTab => {
                if let Some(tab) = self.tab.prev() {
                    self.tab = tab;
                }
            }
            Command::SelectTab(tab) => self.tab = *tab,
            Command::Swipe { from_x, to_x } => {
                if let Some(tab) =
                    SwipeDirection::classify(*from_x, *to_x).and_then(|dir| dir.apply(self.tab))
                {
                    self.tab = tab;
                }
            }
            Command::ToggleClockMode => self.clock_mode = self.clock_mode.toggled(),
            Command::ToggleDark => self.dark = !self.dark,
            Command::ToggleThemeMenu => self.theme_menu_open = !self.theme_menu_open,
            Command::SelectTheme(id) => {
                self.select_theme(id);
            }
            Command::Help => self.help_open = !self.help_open,
            _ => return false,
        }
        true
    }
}
