//! Color themes and the automatic backdrop.

/// A selectable color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    /// Gradient stops, top-left to bottom-right. Empty for `auto`.
    pub gradient: &'static [&'static str],
    /// ANSI 256-color index used for accents in the terminal
    pub accent: u8,
}

impl Theme {
    /// Returns true for the time-based theme.
    pub fn is_auto(&self) -> bool {
        self.id == AUTO_THEME
    }
}

/// Id of the theme that follows the time of day.
pub const AUTO_THEME: &str = "auto";

pub static THEMES: [Theme; 8] = [
    Theme {
        id: AUTO_THEME,
        name: "Automatic (Time-based)",
        gradient: &[],
        accent: 250,
    },
    Theme {
        id: "ocean",
        name: "Deep Ocean",
        gradient: &["blue-900", "cyan-900", "blue-950"],
        accent: 38,
    },
    Theme {
        id: "sunset",
        name: "Sunset Drive",
        gradient: &["orange-500", "purple-600", "indigo-900"],
        accent: 208,
    },
    Theme {
        id: "forest",
        name: "Mystic Forest",
        gradient: &["emerald-900", "teal-900", "slate-900"],
        accent: 36,
    },
    Theme {
        id: "cyber",
        name: "Cyberpunk",
        gradient: &["pink-700", "purple-800", "indigo-900"],
        accent: 199,
    },
    Theme {
        id: "midnight",
        name: "Midnight",
        gradient: &["slate-900", "gray-900", "black"],
        accent: 244,
    },
    Theme {
        id: "berry",
        name: "Berry Smoothie",
        gradient: &["rose-800", "fuchsia-800", "purple-900"],
        accent: 162,
    },
    Theme {
        id: "aurora",
        name: "Aurora",
        gradient: &["green-400", "cyan-600", "blue-800"],
        accent: 84,
    },
];

/// Looks a theme up by id.
pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.id == id)
}

// ============================================================================
// Backdrop
// ============================================================================

/// Background picked by the automatic theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    // dark mode
    LateNight,
    Midnight,
    Evening,
    // light mode
    Morning,
    Sunset,
    Daylight,
}

impl Backdrop {
    /// Picks the backdrop for a local hour (0-23).
    pub fn auto(is_dark: bool, hour: u32) -> Self {
        if is_dark {
            if hour < 6 {
                Backdrop::LateNight
            } else if hour > 20 {
                Backdrop::Midnight
            } else {
                Backdrop::Evening
            }
        } else if hour < 12 {
            Backdrop::Morning
        } else if (16..=19).contains(&hour) {
            Backdrop::Sunset
        } else {
            Backdrop::Daylight
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Backdrop::LateNight => "Late night",
            Backdrop::Midnight => "Midnight",
            Backdrop::Evening => "Evening",
            Backdrop::Morning => "Morning",
            Backdrop::Sunset => "Sunset",
            Backdrop::Daylight => "Daylight",
        }
    }

    pub fn gradient(&self) -> &'static [&'static str] {
        match self {
            Backdrop::LateNight => &["slate-900", "purple-900", "slate-900"],
            Backdrop::Midnight => &["indigo-950", "slate-900", "black"],
            Backdrop::Evening => &["blue-900", "slate-800", "indigo-900"],
            Backdrop::Morning => &["blue-400", "blue-200", "white"],
            Backdrop::Sunset => &["orange-300", "red-300", "purple-300"],
            Backdrop::Daylight => &["sky-400", "blue-300", "indigo-200"],
        }
    }

    pub fn accent(&self) -> u8 {
        match self {
            Backdrop::LateNight => 97,
            Backdrop::Midnight => 61,
            Backdrop::Evening => 25,
            Backdrop::Morning => 75,
            Backdrop::Sunset => 216,
            Backdrop::Daylight => 117,
        }
    }
}
