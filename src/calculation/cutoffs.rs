//! Cutoff period derivation.
//!
//! Cutoffs are never stored. They are recomputed from the earliest and
//! latest attendance dates on every call, so a new punch outside the
//! current span immediately extends the list.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::models::{MonthPeriod, WeekPeriod, YearMonth};
use crate::store::AttendanceStore;

/// Monday-to-Sunday windows covering `[min, max]`.
///
/// The first window starts on the Monday on or before `min`. The last
/// window's end is clamped to `max`, so it may be shorter than seven days.
/// Returns nothing when `min > max`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::weekly_cutoffs_between;
/// use chrono::NaiveDate;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// let cutoffs = weekly_cutoffs_between(wednesday, wednesday);
/// assert_eq!(cutoffs.len(), 1);
/// assert_eq!(cutoffs[0].start_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
/// assert_eq!(cutoffs[0].end_date, wednesday);
/// ```
pub fn weekly_cutoffs_between(min: NaiveDate, max: NaiveDate) -> Vec<WeekPeriod> {
    let mut cutoffs = Vec::new();
    if min > max {
        return cutoffs;
    }

    let days_since_monday = u64::from(min.weekday().num_days_from_monday());
    let mut current = min.checked_sub_days(Days::new(days_since_monday));

    while let Some(start_date) = current.filter(|start| *start <= max) {
        let end_date = start_date
            .checked_add_days(Days::new(6))
            .map_or(max, |sunday| sunday.min(max));
        cutoffs.push(WeekPeriod {
            start_date,
            end_date,
        });
        current = start_date.checked_add_days(Days::new(7));
    }

    cutoffs
}

/// Calendar-month windows covering `[min, max]`.
///
/// Each month's start is raised to `min` and its end lowered to `max`, so
/// the first and last windows may be partial months.
pub fn monthly_cutoffs_between(min: NaiveDate, max: NaiveDate) -> Vec<MonthPeriod> {
    let mut cutoffs = Vec::new();
    if min > max {
        return cutoffs;
    }

    let last = YearMonth::from_date(max);
    let mut current = Some(YearMonth::from_date(min));

    while let Some(year_month) = current.filter(|month| *month <= last) {
        cutoffs.push(MonthPeriod {
            year_month,
            start_date: year_month.first_day().max(min),
            end_date: year_month.last_day().min(max),
        });
        current = year_month.next();
    }

    cutoffs
}

/// Weekly cutoffs spanning every stored attendance date.
///
/// Empty when the store holds no attendance.
pub fn weekly_cutoffs(store: &dyn AttendanceStore) -> Vec<WeekPeriod> {
    match (store.min_date(), store.max_date()) {
        (Some(min), Some(max)) => {
            let cutoffs = weekly_cutoffs_between(min, max);
            debug!(min = %min, max = %max, count = cutoffs.len(), "Derived weekly cutoffs");
            cutoffs
        }
        _ => Vec::new(),
    }
}

/// Monthly cutoffs spanning every stored attendance date.
///
/// Empty when the store holds no attendance.
pub fn monthly_cutoffs(store: &dyn AttendanceStore) -> Vec<MonthPeriod> {
    match (store.min_date(), store.max_date()) {
        (Some(min), Some(max)) => {
            let cutoffs = monthly_cutoffs_between(min, max);
            debug!(min = %min, max = %max, count = cutoffs.len(), "Derived monthly cutoffs");
            cutoffs
        }
        _ => Vec::new(),
    }
}
