//! Calendar-day normalization shared by every attendance read and write path.
//!
//! Attendance is recorded at day granularity. Clients send either a plain
//! date or a full timestamp; [`CalendarDay::parse`] reduces all of them to the
//! calendar date as written, in the timestamp's own offset. The ledger stores
//! that value in a `DATE` column and the lock tracker keys on it, so both
//! sides compare exactly the same value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Naive timestamp layouts accepted in addition to RFC 3339.
///
/// `%.f` consumes an optional fractional-seconds suffix.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A date-only attendance key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a client-supplied date or timestamp into its calendar day.
    ///
    /// Accepted forms:
    /// - `2024-03-01`
    /// - `2024-03-01T08:15:00`, `2024-03-01 08:15:00.250`, `2024-03-01T08:15`
    /// - RFC 3339 with an offset, e.g. `2024-03-01T23:59:59+05:30` or `...Z`
    ///
    /// The time of day and the offset are discarded; no timezone conversion
    /// is applied.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(CoreError::Validation("date is required".into()));
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self(date));
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(ts.date_naive()));
        }

        NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|ts| Self(ts.date()))
            .ok_or_else(|| CoreError::Validation(format!("invalid date '{raw}'")))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for CalendarDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayRange {
    pub from: CalendarDay,
    pub to: CalendarDay,
}

impl DayRange {
    /// Build a range, rejecting `from > to`.
    pub fn new(from: CalendarDay, to: CalendarDay) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::Validation(format!(
                "date range start {from} is after end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// A range covering exactly one day.
    pub fn single(day: CalendarDay) -> Self {
        Self { from: day, to: day }
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.from <= day && day <= self.to
    }
}
