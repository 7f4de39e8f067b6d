//! Application configuration.
//!
//! The configuration is a JSON file read once at startup. Every field has a
//! default, so an empty object (or no file at all) yields a working setup.

mod error;

pub use error::ConfigError;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{default_cities, parse_timezone, ResolvedCity};
use crate::shell::find_theme;
use crate::types::{Coordinates, WorldCity};

/// Directory name under the platform config directory.
const APP_DIR: &str = "clockdeck";
/// File name of the configuration.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// ServiceConfig
// ============================================================================

/// Endpoints and credentials of the weather and quote services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// When false, fallback values are used without any network access
    pub enabled: bool,
    /// Base URL of the Open-Meteo API
    pub weather_url: String,
    /// Base URL of the Generative Language API
    pub quote_url: String,
    /// Model used to generate quotes
    pub quote_model: String,
    /// Environment variable holding the quote API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weather_url: "https://api.open-meteo.com".to_string(),
            quote_url: "https://generativelanguage.googleapis.com".to_string(),
            quote_model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl ServiceConfig {
    /// Reads the quote API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

// ============================================================================
// AppConfig
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// IANA timezone of the main clock
    pub timezone: String,
    /// Caption shown under the main clock
    pub timezone_label: String,
    /// World clock entries, in display order
    pub cities: Vec<WorldCity>,
    /// Fixed location for the weather panel; London when absent
    pub location: Option<Coordinates>,
    pub timer_minutes: u32,
    pub timer_seconds: u32,
    /// Theme id, see `clockdeck themes`
    pub theme: String,
    pub dark: bool,
    /// Start with the ambient sound playing
    pub ambient_sound: bool,
    pub services: ServiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Karachi".to_string(),
            timezone_label: "Pakistan Time (PKT)".to_string(),
            cities: default_cities(),
            location: None,
            timer_minutes: 5,
            timer_seconds: 0,
            theme: "auto".to_string(),
            dark: true,
            ambient_sound: false,
            services: ServiceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file location, e.g. `~/.config/clockdeck/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads and validates the configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used if
    /// present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// value fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Self::from_path(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_path(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads a config file without validating it.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validates field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_timezone(&self.timezone)?;
        for city in &self.cities {
            ResolvedCity::resolve(city)?;
        }

        if let Some(location) = &self.location {
            if !location.is_valid() {
                return Err(ConfigError::InvalidValue(format!(
                    "location ({}, {}) is out of range",
                    location.latitude, location.longitude
                )));
            }
        }
        if self.timer_seconds > 59 {
            return Err(ConfigError::InvalidValue(
                "timer_seconds must be between 0 and 59".to_string(),
            ));
        }
        if find_theme(&self.theme).is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "unknown theme '{}'",
                self.theme
            )));
        }
        if self.services.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "services.timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured countdown duration in milliseconds.
    pub fn timer_duration_ms(&self) -> u64 {
        (u64::from(self.timer_minutes) * 60 + u64::from(self.timer_seconds)) * 1000
    }

    /// Location used for the weather panel.
    pub fn coordinates(&self) -> Coordinates {
        self.location.unwrap_or(Coordinates::DEFAULT)
    }
}

// ============================================================================
// Tests
// ============================================================================
