//! Serde helpers for the date formats the finance API speaks.
//!
//! Expense timestamps arrive either naive (`2025-11-05T10:30:00`) or with an
//! offset (`2025-11-05T10:30:00+00:00`). Both are kept as the wall-clock time
//! they spell, so the calendar day a user sees is the one filters compare.
//! Budget months arrive as dates and are normalized to the first day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

const WIRE_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses an API timestamp into its wall-clock `NaiveDateTime`.
#[must_use]
pub fn parse_wall_clock(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parses a budget month (`2025-11`, `2025-11-17`, or a timestamp) to its first day.
#[must_use]
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| parse_wall_clock(raw).map(|dt| dt.date()))?;
    first_of_month(date)
}

/// Normalizes a date to the first day of its month.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

/// `serde(with = ...)` module for expense timestamps.
pub mod wall_clock {
    use super::{Deserialize, Deserializer, NaiveDateTime, Serializer, WIRE_DATETIME};
    use serde::de::Error as _;

    /// Serializes as `YYYY-MM-DDTHH:MM:SS`.
    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(WIRE_DATETIME).to_string())
    }

    /// Accepts naive, offset, and date-only forms.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

/// `serde(with = ...)` module for budget months.
pub mod month {
    use super::{Deserialize, Deserializer, NaiveDate, Serializer};
    use serde::de::Error as _;

    /// Serializes as `YYYY-MM-01`.
    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%Y-%m-01").to_string())
    }

    /// Accepts any date inside the month and normalizes it to day 1.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_month(&raw).ok_or_else(|| D::Error::custom(format!("invalid month '{raw}'")))
    }
}

/// Deserializes a plain `YYYY-MM-DD` date, tolerating a trailing time part.
pub fn deserialize_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_wall_clock(&raw)
        .map(|dt| dt.date())
        .ok_or_else(|| D::Error::custom(format!("invalid date '{raw}'")))
}
