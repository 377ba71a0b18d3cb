//! Period shape checks shared by the weekly computations.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// Whether `start` is a Monday and `end` is a Sunday.
///
/// Only the weekdays are checked; the two dates are not required to fall in
/// the same week.
pub fn is_valid_week(start: NaiveDate, end: NaiveDate) -> bool {
    start.weekday() == Weekday::Mon && end.weekday() == Weekday::Sun
}

/// Fails with `InvalidPeriod` unless the range runs Monday to Sunday.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_week;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
/// assert!(validate_week(monday, sunday).is_ok());
/// assert!(validate_week(sunday, sunday).is_err());
/// ```
pub fn validate_week(start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
    let message = if start.weekday() != Weekday::Mon {
        format!("start date must be a Monday, got {}", start.weekday())
    } else if end.weekday() != Weekday::Sun {
        format!("end date must be a Sunday, got {}", end.weekday())
    } else {
        return Ok(());
    };

    Err(EngineError::InvalidPeriod {
        start,
        end,
        message,
    })
}
