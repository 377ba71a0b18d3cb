//! Cutoff period models.
//!
//! This module contains the [`YearMonth`] value type and the weekly and
//! monthly period shapes that hours, pay and deductions are aggregated over.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let month: YearMonth = "2024-02".parse().unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(month.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a year-month, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| EngineError::InvalidYearMonth {
                value: format!("{:04}-{:02}", year, month),
            })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// The calendar month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        // Only the final representable month overflows, and its last day is NaiveDate::MAX.
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The following month, if representable.
    pub fn next(&self) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidYearMonth {
            value: s.to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// A weekly cutoff window.
///
/// Cutoffs produced from stored data always start on a Monday; the final
/// window may end before Sunday when attendance data stops mid-week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPeriod {
    /// First day of the window (a Monday).
    pub start_date: NaiveDate,
    /// Last day of the window (a Sunday, unless clamped).
    pub end_date: NaiveDate,
}

/// A monthly cutoff window.
///
/// `start_date` and `end_date` are the calendar month's bounds, narrowed to
/// the span of stored attendance where the month extends beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// The calendar month.
    pub year_month: YearMonth,
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Last day of the window.
    pub end_date: NaiveDate,
}

impl MonthPeriod {
    /// The full calendar month, unclamped.
    pub fn full(year_month: YearMonth) -> Self {
        Self {
            year_month,
            start_date: year_month.first_day(),
            end_date: year_month.last_day(),
        }
    }
}

/// The period a payroll figure was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    /// A Monday-to-Sunday week.
    Week(WeekPeriod),
    /// A calendar month.
    Month(MonthPeriod),
}

impl Period {
    /// First day covered (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Period::Week(week) => week.start_date,
            Period::Month(month) => month.start_date,
        }
    }

    /// Last day covered (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Period::Week(week) => week.end_date,
            Period::Month(month) => month.end_date,
        }
    }
}
