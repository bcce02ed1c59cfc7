//! Common types used across the tracker

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while parsing a `YYYY-MM` month
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum YearMonthError {
    #[error("Invalid format. Use YYYY-MM (got \"{0}\")")]
    Format(String),

    #[error("Month must be between 1 and 12 (got {0})")]
    MonthOutOfRange(u32),
}

/// A calendar month, written as `YYYY-MM` on the wire and in file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthError> {
        if !(1..=12).contains(&month) {
            return Err(YearMonthError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month is validated to 1..=12, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month (28, 29, 30 or 31)
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Whether the date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Number of days in a month of the Gregorian calendar: the distance from
/// its first day to the first day of the following month.
///
/// Returns 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let following = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    following
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(0)
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| YearMonthError::Format(s.to_string()))?;

        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(YearMonthError::Format(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| YearMonthError::Format(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| YearMonthError::Format(s.to_string()))?;

        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
