//! Clock display for clockdeck.
//!
//! - `face`: calendar fields, digital string and analog hand angles
//! - `world`: world clock rows with day/night classification
//!
//! [`ClockDisplay`] ties them to the configured target timezone and caches
//! the latest wall-clock sample.

pub mod face;
pub mod world;

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use crate::config::ConfigError;
use crate::types::WorldCity;

pub use face::{digital_time, ClockFields, HandAngles, TimeOfDay};
pub use world::{default_cities, is_night, CityRow, ResolvedCity};

/// Parses an IANA timezone identifier.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|e| ConfigError::InvalidTimezone(name.to_string(), e.to_string()))
}

/// Target-timezone clock plus world clocks.
#[derive(Debug, Clone)]
pub struct ClockDisplay {
    timezone: Tz,
    label: String,
    cities: Vec<ResolvedCity>,
    sample: DateTime<Utc>,
}

impl ClockDisplay {
    /// Creates a display, resolving every city's timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if a city timezone is not a known identifier.
    pub fn new(
        timezone: Tz,
        label: impl Into<String>,
        cities: &[WorldCity],
    ) -> Result<Self, ConfigError> {
        let cities = cities
            .iter()
            .map(ResolvedCity::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            timezone,
            label: label.into(),
            cities,
            sample: Utc::now(),
        })
    }

    /// Stores a new wall-clock sample.
    pub fn sample(&mut self, instant: DateTime<Utc>) {
        self.sample = instant;
    }

    /// The latest sample.
    pub fn instant(&self) -> DateTime<Utc> {
        self.sample
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fields of the latest sample in the target timezone.
    pub fn fields(&self) -> ClockFields {
        ClockFields::observe(self.sample, self.timezone)
    }

    /// Digital time of the latest sample in the target timezone.
    pub fn digital(&self) -> String {
        digital_time(self.sample, self.timezone)
    }

    /// Analog hand angles of the latest sample in the target timezone.
    pub fn hands(&self) -> HandAngles {
        HandAngles::from_fields(self.fields())
    }

    /// World clock rows for the latest sample.
    pub fn world_rows(&self) -> Vec<CityRow> {
        self.cities
            .iter()
            .map(|city| city.row(self.sample))
            .collect()
    }

    /// Calendar line in the machine's local timezone, e.g. `Friday, October 16`.
    pub fn local_date(&self) -> String {
        self.sample
            .with_timezone(&Local)
            .format("%A, %B %-d")
            .to_string()
    }

    /// Hour of the latest sample in the machine's local timezone.
    pub fn local_hour(&self) -> u32 {
        ClockFields::from_time(&self.sample.with_timezone(&Local)).hour
    }
}
