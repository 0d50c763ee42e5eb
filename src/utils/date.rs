//! Front matter date parsing and normalization.
//!
//! # Accepted Formats
//!
//! - `YYYY-MM-DD`
//! - RFC 3339: `YYYY-MM-DDTHH:MM:SS[.fraction](Z|+HH:MM|-HH:MM)`
//! - zone-less `YYYY-MM-DDTHH:MM:SS[.fraction]` (or a space instead of
//!   `T`, as YAML and TOML allow), read as UTC
//!
//! Offsets are folded into UTC and fractional seconds are dropped on output.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! assert_eq!(dt.to_iso(), "2024-06-15");
//!
//! let dt = DateTimeUtc::parse("2024-06-15T01:30:00+02:00").unwrap();
//! assert_eq!(dt.to_iso(), "2024-06-14T23:30:00Z");
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const RFC3339_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const ZONELESS_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A calendar date, or a point in time in UTC.
///
/// The variant records whether the source carried a time of day, so a
/// datetime at UTC midnight is never mistaken for a bare date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeUtc {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl DateTimeUtc {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::Date)
    }

    /// Parse any of the accepted formats, returning `None` on malformed or
    /// out-of-range input.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if is_plain_date(s) {
            return NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .map(Self::Date);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::DateTime(dt.with_timezone(&Utc)));
        }

        ZONELESS_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| Self::DateTime(naive.and_utc()))
    }

    /// True when the source had no time of day.
    pub const fn is_date_only(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// `YYYY-MM-DD` for dates, `YYYY-MM-DDTHH:MM:SSZ` for datetimes.
    pub fn to_iso(&self) -> String {
        match self {
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::DateTime(dt) => dt.format(RFC3339_UTC_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

/// Exactly `DDDD-DD-DD`; chrono alone would also take `2024-6-15`.
fn is_plain_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
