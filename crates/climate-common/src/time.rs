//! Date handling for station observations.
//!
//! Observation dates are stored as `YYYY-MM-DD` text, which sorts the same
//! way as the calendar. Windows are therefore compared as strings on the
//! database side and built from `NaiveDate` arithmetic here.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ClimateError, ClimateResult};

/// Storage format of observation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window served by the year routes.
pub const TRAILING_YEAR_DAYS: i64 = 365;

/// Parse a stored observation date.
pub fn parse_stored_date(s: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| ClimateError::InvalidStoredDate(s.to_string()))
}

/// Format a date the way the database stores it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Half-open date window: `start < date <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Exclusive lower bound.
    pub start: NaiveDate,
    /// Inclusive upper bound.
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The year ending at `end`, anchored to the dataset rather than the clock.
    pub fn trailing_year(end: NaiveDate) -> Self {
        Self {
            start: end - Duration::days(TRAILING_YEAR_DAYS),
            end,
        }
    }

    /// Bounds as stored-format strings, ready to bind.
    pub fn bounds(&self) -> (String, String) {
        (format_date(self.start), format_date(self.end))
    }

    /// Whether a stored date string falls inside the window.
    pub fn contains(&self, date: &str) -> bool {
        let (start, end) = self.bounds();
        date > start.as_str() && date <= end.as_str()
    }
}
