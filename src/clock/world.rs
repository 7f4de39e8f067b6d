//! World clock rows.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::face::ClockFields;
use super::parse_timezone;
use crate::config::ConfigError;
use crate::types::WorldCity;

/// Cities shown when the configuration does not list any.
pub fn default_cities() -> Vec<WorldCity> {
    vec![
        WorldCity::new("New York", "America/New_York", "🇺🇸"),
        WorldCity::new("London", "Europe/London", "🇬🇧"),
        WorldCity::new("Tokyo", "Asia/Tokyo", "🇯🇵"),
        WorldCity::new("Sydney", "Australia/Sydney", "🇦🇺"),
        WorldCity::new("Dubai", "Asia/Dubai", "🇦🇪"),
    ]
}

/// Night is strictly before 06:00 or strictly after 18:59; hours 6 and 18
/// are both day.
pub fn is_night(hour: u32) -> bool {
    hour < 6 || hour > 18
}

/// A city with its timezone already parsed.
#[derive(Debug, Clone)]
pub struct ResolvedCity {
    pub city: WorldCity,
    pub tz: Tz,
}

impl ResolvedCity {
    /// Parses the city's timezone.
    pub fn resolve(city: &WorldCity) -> Result<Self, ConfigError> {
        Ok(Self {
            tz: parse_timezone(&city.timezone)?,
            city: city.clone(),
        })
    }

    /// Builds the row for `instant`.
    pub fn row(&self, instant: DateTime<Utc>) -> CityRow {
        let local = instant.with_timezone(&self.tz);
        let hour = ClockFields::from_time(&local).hour;
        CityRow {
            name: self.city.name.clone(),
            flag: self.city.flag.clone(),
            time: local.format("%-I:%M %p").to_string(),
            is_night: is_night(hour),
        }
    }
}

/// One rendered world clock entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRow {
    pub name: String,
    pub flag: String,
    /// `h:mm AM/PM`
    pub time: String,
    pub is_night: bool,
}
