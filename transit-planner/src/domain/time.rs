//! Time-of-day values and duration formatting.
//!
//! Timetables list departures as "HH:MM" strings with no date attached.
//! `TimeOfDay` validates and orders them; `format_duration` renders the
//! abbreviated hour/minute text shown next to itinerary legs.

use std::fmt;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time with minute precision.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_hhmm("14:17").unwrap();
/// assert_eq!(t.hour(), 14);
/// assert_eq!(t.to_string(), "14:17");
///
/// assert!(TimeOfDay::parse_hhmm("1417").is_err());
/// assert!(TimeOfDay::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Create from hour and minute, if in range.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Parse "HH:MM" (exactly five characters, 24-hour clock).
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute)
    }

    /// Time of day of a date-time, truncated to the minute.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hhmm(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({self})")
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Render a duration as abbreviated hours and minutes.
///
/// Seconds are truncated; zero hours are omitted. Negative durations are
/// shown as zero.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use transit_planner::domain::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(12)), "12m");
/// assert_eq!(format_duration(Duration::minutes(65)), "1h 5m");
/// assert_eq!(format_duration(Duration::minutes(120)), "2h");
/// assert_eq!(format_duration(Duration::seconds(59)), "0m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_mins = duration.num_minutes().max(0);
    let hours = total_mins / 60;
    let mins = total_mins % 60;

    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Longest duration `duration_from_secs_f64` produces: one week.
pub const MAX_DURATION_SECS: f64 = 7.0 * 24.0 * 3600.0;

/// Convert fractional seconds to a `Duration`, rounded to the millisecond.
///
/// Non-finite and negative inputs become zero; values above
/// `MAX_DURATION_SECS` are capped.
pub fn duration_from_secs_f64(secs: f64) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::zero();
    }
    Duration::milliseconds((secs.min(MAX_DURATION_SECS) * 1000.0).round() as i64)
}
