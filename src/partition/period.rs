use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ACCEPTED_DATE_FORMATS, ACCEPTED_YEARS};
use crate::error::SyncError;

/// Calendar granularity of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Monday through Sunday
    Weekly,
    /// First through last day of a month
    Monthly,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(SyncError::UnsupportedKind(s.to_string())),
        }
    }
}

/// An inclusive date range aligned to a calendar week or month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Length of a month, or `None` when it lies outside chrono's calendar.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(last_day_of_month)
        .map(|last| last.day())
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// The day before the first of the following month.
///
/// `None` only for the final month chrono can represent.
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Parse an extract date cell.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`, and datetime values whose first
/// ten characters are such a date (`2021-01-28T00:00:00Z`). Years outside
/// 1 to 9999, including signed extended years, are rejected.
pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let parse = |candidate: &str| {
        ACCEPTED_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
    };

    parse(value)
        .or_else(|| value.get(..10).and_then(parse))
        .filter(|date| ACCEPTED_YEARS.contains(&date.year()))
}
