//! Application runtime.
//!
//! [`App`] owns every piece of dashboard state and is the only place where
//! commands, timer events and panel updates are applied. The event loop in
//! [`runner`] feeds it.

pub mod runner;

pub use runner::run_dashboard;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::alert::AlertSink;
use crate::clock::{parse_timezone, CityRow, ClockDisplay, HandAngles};
use crate::config::{AppConfig, ConfigError};
use crate::engine::{CountdownEngine, StopwatchEngine, TimerEvent};
use crate::services::{weather_summary, PanelUpdate};
use crate::shell::{Appearance, Command, ShellState};
use crate::sound::AmbientSound;
use crate::timing::{Countdown, Stopwatch, SystemTimeSource, TimeSource};
use crate::types::{ClockMode, QuoteData, Tab, WeatherData};

/// Shown when the countdown reaches zero.
pub const TIMES_UP: &str = "Time's up!";

/// Whether the event loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything needed to draw one dashboard frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub tab: Tab,
    pub clock_mode: ClockMode,
    pub appearance: Appearance,
    pub dark: bool,
    pub theme_id: &'static str,
    pub theme_menu_open: bool,
    pub help_open: bool,
    pub sound_on: bool,
    pub visitors: String,
    pub date_line: String,
    /// `None` until the weather service answers
    pub weather_line: Option<String>,
    pub quote: QuoteData,
    pub timezone_label: String,
    pub digital: String,
    pub hands: HandAngles,
    pub world: Vec<CityRow>,
    pub stopwatch: Stopwatch,
    pub countdown: Countdown,
    pub notice: Option<String>,
}

/// Dashboard state and command dispatcher.
pub struct App<S: TimeSource = SystemTimeSource> {
    pub shell: ShellState,
    pub clock: ClockDisplay,
    stopwatch: StopwatchEngine<S>,
    countdown: CountdownEngine,
    sound: AmbientSound,
    weather: Option<WeatherData>,
    quote: QuoteData,
    notice: Option<String>,
}

impl App<SystemTimeSource> {
    /// Builds the app from configuration, returning the receiver of its
    /// timer events.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured timezone is unknown.
    pub fn from_config(
        config: &AppConfig,
        alert: Arc<dyn AlertSink>,
        sound: AmbientSound,
    ) -> Result<(Self, mpsc::UnboundedReceiver<TimerEvent>), ConfigError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let stopwatch = StopwatchEngine::system(event_tx.clone());
        let countdown = CountdownEngine::new(
            Countdown::with_duration(config.timer_duration_ms()),
            alert,
            event_tx,
        );
        let app = Self::new(config, stopwatch, countdown, sound)?;
        Ok((app, event_rx))
    }
}

impl<S: TimeSource> App<S> {
    /// Builds the app around existing engines.
    pub fn new(
        config: &AppConfig,
        stopwatch: StopwatchEngine<S>,
        countdown: CountdownEngine,
        sound: AmbientSound,
    ) -> Result<Self, ConfigError> {
        let timezone = parse_timezone(&config.timezone)?;
        let clock = ClockDisplay::new(timezone, config.timezone_label.clone(), &config.cities)?;

        let mut shell = ShellState::new();
        shell.dark = config.dark;
        shell.select_theme(&config.theme);

        Ok(Self {
            shell,
            clock,
            stopwatch,
            countdown,
            sound,
            weather: None,
            quote: QuoteData::loading(),
            notice: None,
        })
    }

    /// Applies one user command.
    pub fn dispatch(&mut self, command: Command) -> Flow {
        debug!(command = %command, tab = self.shell.tab.label(), "Dispatching command");
        self.notice = None;

        if self.shell.apply(&command) {
            return Flow::Continue;
        }

        match command {
            Command::ToggleRun => match self.shell.tab {
                Tab::Stopwatch => {
                    self.stopwatch.toggle_run();
                }
                Tab::Timer => {
                    self.countdown.toggle_run();
                }
                Tab::Clock => {}
            },
            Command::Lap => {
                if self.shell.tab == Tab::Stopwatch {
                    self.stopwatch.lap();
                }
            }
            Command::Reset => match self.shell.tab {
                Tab::Stopwatch => self.stopwatch.reset(),
                Tab::Timer => self.countdown.reset(),
                Tab::Clock => {}
            },
            Command::EditTimer => {
                if self.shell.tab == Tab::Timer && !self.countdown.begin_edit() {
                    self.notice = Some("Pause the timer to edit it".to_string());
                }
            }
            Command::ConfigureTimer { minutes, seconds } => {
                if !self.countdown.configure(minutes, seconds) {
                    self.notice = Some("Pause the timer to edit it".to_string());
                }
            }
            Command::ToggleSound => {
                let playing = self.sound.set_enabled(!self.sound.is_playing());
                info!(playing, "Ambient sound toggled");
            }
            Command::Quit => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    /// Shows a one-line message until the next command.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Turns the ambient sound on or off.
    pub fn set_sound(&mut self, enabled: bool) -> bool {
        self.sound.set_enabled(enabled)
    }

    /// Applies an engine event. Returns true if the frame changed.
    pub fn on_timer_event(&mut self, event: TimerEvent) -> bool {
        if event == TimerEvent::CountdownCompleted {
            info!("Countdown completed");
            self.notice = Some(TIMES_UP.to_string());
        }
        match self.shell.tab {
            Tab::Stopwatch => event.is_stopwatch() || !event.is_tick(),
            Tab::Timer => !event.is_stopwatch(),
            Tab::Clock => !event.is_tick(),
        }
    }

    /// Applies a weather or quote result.
    pub fn on_panel(&mut self, update: PanelUpdate) {
        match update {
            PanelUpdate::Weather(weather) => self.weather = Some(weather),
            PanelUpdate::Quote(quote) => self.quote = quote,
        }
    }

    /// Stores a new wall-clock sample.
    pub fn sample_clock(&mut self, now: DateTime<Utc>) {
        self.clock.sample(now);
    }

    /// Advances the simulated visitor count.
    pub fn step_visitors<R: Rng>(&mut self, rng: &mut R) -> u64 {
        self.shell.visitors.step(rng)
    }

    pub fn weather(&self) -> Option<WeatherData> {
        self.weather
    }

    pub fn quote(&self) -> &QuoteData {
        &self.quote
    }

    pub fn stopwatch(&self) -> Stopwatch {
        self.stopwatch.snapshot()
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown.snapshot()
    }

    pub fn sound_on(&self) -> bool {
        self.sound.is_playing()
    }

    /// Stops tickers and releases the audio device.
    pub fn shutdown(&mut self) {
        self.sound.dispose();
        if self.stopwatch.snapshot().is_running() {
            self.stopwatch.toggle_run();
        }
        if self.countdown.snapshot().is_running() {
            self.countdown.toggle_run();
        }
    }

    /// Snapshot of everything on screen.
    pub fn frame(&self) -> Frame {
        Frame {
            tab: self.shell.tab,
            clock_mode: self.shell.clock_mode,
            appearance: self.shell.appearance(self.clock.local_hour()),
            dark: self.shell.dark,
            theme_id: self.shell.theme.id,
            theme_menu_open: self.shell.theme_menu_open,
            help_open: self.shell.help_open,
            sound_on: self.sound.is_playing(),
            visitors: self.shell.visitors.display(),
            date_line: self.clock.local_date(),
            weather_line: self.weather.as_ref().map(weather_summary),
            quote: self.quote.clone(),
            timezone_label: self.clock.label().to_string(),
            digital: self.clock.digital(),
            hands: self.clock.hands(),
            world: self.clock.world_rows(),
            stopwatch: self.stopwatch.snapshot(),
            countdown: self.countdown.snapshot(),
            notice: self.notice.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
