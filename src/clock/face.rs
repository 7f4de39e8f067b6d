//! Clock face math.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Hour, minute and second as observed in some timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFields {
    /// 0-23
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockFields {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Reads the fields of any timezone-aware time.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }

    /// Observes `instant` in `tz`.
    pub fn observe(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self::from_time(&instant.with_timezone(&tz))
    }
}

/// Clockwise rotation of each analog hand from 12 o'clock, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour_deg: f64,
    pub minute_deg: f64,
    pub second_deg: f64,
}

impl HandAngles {
    /// Computes hand angles. The minute hand creeps with the seconds and
    /// the hour hand with the minutes; the second hand jumps.
    pub fn from_fields(fields: ClockFields) -> Self {
        let hours = f64::from(fields.hour % 12);
        let minutes = f64::from(fields.minute);
        let seconds = f64::from(fields.second);

        Self {
            second_deg: (seconds / 60.0) * 360.0,
            minute_deg: (minutes / 60.0) * 360.0 + (seconds / 60.0) * 6.0,
            hour_deg: (hours / 12.0) * 360.0 + (minutes / 60.0) * 30.0,
        }
    }
}

/// en-US 12-hour time with seconds in `tz`, e.g. `3:04:05 PM`.
pub fn digital_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M:%S %p").to_string()
}

/// Coarse part of the day used as quote context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Night,
}

impl TimeOfDay {
    /// Before noon is morning, before 18:00 afternoon, otherwise night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Night => "Night",
        }
    }
}
