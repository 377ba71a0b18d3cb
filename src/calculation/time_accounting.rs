//! Attendance to worked-hours conversion.
//!
//! A day's worked hours are the minutes between log-in and log-out, converted
//! to hours, less a late penalty when the employee logged in after the
//! 08:10 grace cutoff. Both quantities are rounded to two decimals before
//! they are combined, and the period total is rounded again.
//!
//! Log-out is always read as the same day as log-in, so a record whose
//! log-out precedes its log-in contributes negative hours. Nothing is
//! clamped at zero.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, YearMonth};
use crate::store::{AttendanceStore, EmployeeDirectory};

use super::rounding::{minutes_to_hours, round_half_up};
use super::validation::validate_week;

/// Latest log-in time that carries no late penalty.
pub const GRACE_PERIOD_END: NaiveTime = match NaiveTime::from_hms_opt(8, 10, 0) {
    Some(time) => time,
    None => panic!("08:10 is a valid time of day"),
};

/// One day's contribution to a worked-hours total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// The day worked.
    pub date: NaiveDate,
    /// Hours between log-in and log-out.
    pub logged_hours: Decimal,
    /// Hours deducted for logging in after the grace cutoff.
    pub late_penalty_hours: Decimal,
    /// `logged_hours - late_penalty_hours`.
    pub worked_hours: Decimal,
}

/// Worked hours for a set of records, with the per-day detail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkedHoursSummary {
    /// Per-day breakdown in record order.
    pub days: Vec<DailyHours>,
    /// Sum of the days' worked hours, two decimals half-up.
    pub total_hours: Decimal,
}

impl WorkedHoursSummary {
    /// Days whose worked hours came out negative.
    pub fn negative_days(&self) -> impl Iterator<Item = &DailyHours> {
        self.days.iter().filter(|day| day.worked_hours < Decimal::ZERO)
    }
}

/// Hours deducted for logging in at `log_in`.
///
/// Zero at or before [`GRACE_PERIOD_END`]; otherwise the minutes past the
/// cutoff, converted to hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::late_penalty_hours;
/// use chrono::NaiveTime;
///
/// let on_time = NaiveTime::from_hms_opt(8, 10, 0).unwrap();
/// let late = NaiveTime::from_hms_opt(8, 25, 0).unwrap();
/// assert!(late_penalty_hours(on_time).is_zero());
/// assert_eq!(late_penalty_hours(late).to_string(), "0.25");
/// ```
pub fn late_penalty_hours(log_in: NaiveTime) -> Decimal {
    if log_in > GRACE_PERIOD_END {
        minutes_to_hours((log_in - GRACE_PERIOD_END).num_minutes())
    } else {
        round_half_up(Decimal::ZERO)
    }
}

/// Applies the daily rule to one record.
pub fn daily_hours(record: &AttendanceRecord) -> DailyHours {
    let logged_hours = minutes_to_hours(record.worked_minutes());
    let late_penalty_hours = late_penalty_hours(record.log_in);

    DailyHours {
        date: record.date,
        logged_hours,
        late_penalty_hours,
        worked_hours: logged_hours - late_penalty_hours,
    }
}

/// Worked hours for one record after the late penalty.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::daily_worked_hours;
/// use payroll_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = AttendanceRecord::new(
///     "10001",
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     NaiveTime::from_hms_opt(8, 25, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// );
/// // 8.58h logged less a 0.25h penalty.
/// assert_eq!(daily_worked_hours(&record).to_string(), "8.33");
/// ```
pub fn daily_worked_hours(record: &AttendanceRecord) -> Decimal {
    daily_hours(record).worked_hours
}

/// Sums the daily rule over `records`.
pub fn summarize_worked_hours(records: &[AttendanceRecord]) -> WorkedHoursSummary {
    let days: Vec<DailyHours> = records.iter().map(daily_hours).collect();
    let total_hours = round_half_up(days.iter().map(|day| day.worked_hours).sum());

    WorkedHoursSummary { days, total_hours }
}

/// Worked-hours summary for one employee over `[start, end]`.
pub fn worked_hours_summary(
    store: &dyn AttendanceStore,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> WorkedHoursSummary {
    let records = store.find_by_employee_and_range(employee_id, start, end);
    let summary = summarize_worked_hours(&records);

    debug!(
        employee_id = %employee_id,
        start = %start,
        end = %end,
        records = records.len(),
        total_hours = %summary.total_hours,
        "Computed worked hours"
    );
    summary
}

/// Total worked hours for one employee over `[start, end]`, inclusive.
///
/// An employee with no records in the range has worked `0.00` hours.
pub fn compute_worked_hours(
    store: &dyn AttendanceStore,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Decimal {
    worked_hours_summary(store, employee_id, start, end).total_hours
}

/// Worked hours for a Monday-to-Sunday week.
///
/// Fails with `InvalidPeriod` when the range is not Monday to Sunday.
pub fn weekly_hours(
    store: &dyn AttendanceStore,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Decimal> {
    validate_week(start, end)?;
    Ok(compute_worked_hours(store, employee_id, start, end))
}

/// Worked hours for a calendar month.
pub fn monthly_hours(
    store: &dyn AttendanceStore,
    employee_id: &str,
    year_month: YearMonth,
) -> Decimal {
    compute_worked_hours(store, employee_id, year_month.first_day(), year_month.last_day())
}

/// Stores one day's punches for a known employee.
///
/// The employee's name is copied onto the record. Fails with
/// `EmployeeNotFound` for an unknown employee and with `DuplicateAttendance`
/// when the store already holds a record for that day.
pub fn record_attendance(
    store: &dyn AttendanceStore,
    employees: &dyn EmployeeDirectory,
    employee_id: &str,
    date: NaiveDate,
    log_in: NaiveTime,
    log_out: NaiveTime,
) -> EngineResult<AttendanceRecord> {
    let employee = employees
        .find_by_employee_id(employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;

    let record = AttendanceRecord {
        employee_id: employee.employee_id,
        first_name: employee.first_name,
        last_name: employee.last_name,
        date,
        log_in,
        log_out,
    };
    store.insert(record.clone())?;

    info!(
        employee_id = %record.employee_id,
        date = %record.date,
        "Recorded attendance"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;
    use crate::store::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn store_with_week(log_in: NaiveTime, log_out: NaiveTime) -> InMemoryAttendanceStore {
        let store = InMemoryAttendanceStore::new();
        for day in 3..=7 {
            store
                .insert(AttendanceRecord::new("10001", date(2024, 6, day), log_in, log_out))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_no_penalty_at_or_before_grace_cutoff() {
        assert_eq!(late_penalty_hours(time(7, 45)), dec("0.00"));
        assert_eq!(late_penalty_hours(time(8, 10)), dec("0.00"));
    }

    #[test]
    fn test_penalty_after_grace_cutoff() {
        assert_eq!(late_penalty_hours(time(8, 25)), dec("0.25"));
        assert_eq!(late_penalty_hours(time(8, 11)), dec("0.02"));
        assert_eq!(late_penalty_hours(time(9, 10)), dec("1.00"));
    }

    #[test]
    fn test_seconds_past_cutoff_do_not_count_as_a_minute() {
        let log_in = NaiveTime::from_hms_opt(8, 10, 30).unwrap();
        assert_eq!(late_penalty_hours(log_in), dec("0.00"));
    }

    #[test]
    fn test_daily_hours_breakdown() {
        let record = AttendanceRecord::new("10001", date(2024, 6, 3), time(8, 59), time(18, 31));
        let day = daily_hours(&record);

        // 572 minutes logged, 49 minutes late.
        assert_eq!(day.logged_hours, dec("9.53"));
        assert_eq!(day.late_penalty_hours, dec("0.82"));
        assert_eq!(day.worked_hours, dec("8.71"));
    }

    #[test]
    fn test_negative_hours_flow_through() {
        let record = AttendanceRecord::new("10001", date(2024, 6, 3), time(22, 0), time(6, 0));
        // -16.00 logged, 13h50m late.
        assert_eq!(daily_worked_hours(&record), dec("-29.83"));
    }

    #[test]
    fn test_full_week_on_time() {
        let store = store_with_week(time(8, 0), time(17, 0));
        let hours = compute_worked_hours(&store, "10001", date(2024, 6, 3), date(2024, 6, 9));
        assert_eq!(hours, dec("45.00"));
    }

    #[test]
    fn test_no_records_yields_zero() {
        let store = InMemoryAttendanceStore::new();
        let hours = compute_worked_hours(&store, "10001", date(2024, 6, 3), date(2024, 6, 9));
        assert_eq!(hours, dec("0.00"));
    }

    #[test]
    fn test_range_excludes_other_employees_and_days() {
        let store = store_with_week(time(8, 0), time(17, 0));
        store
            .insert(AttendanceRecord::new("10002", date(2024, 6, 3), time(8, 0), time(17, 0)))
            .unwrap();
        store
            .insert(AttendanceRecord::new("10001", date(2024, 6, 10), time(8, 0), time(17, 0)))
            .unwrap();

        let hours = compute_worked_hours(&store, "10001", date(2024, 6, 4), date(2024, 6, 5));
        assert_eq!(hours, dec("18.00"));
    }

    #[test]
    fn test_summary_flags_negative_days() {
        let records = vec![
            AttendanceRecord::new("10001", date(2024, 6, 3), time(8, 0), time(17, 0)),
            AttendanceRecord::new("10001", date(2024, 6, 4), time(17, 0), time(8, 0)),
        ];
        let summary = summarize_worked_hours(&records);

        assert_eq!(summary.days.len(), 2);
        assert_eq!(summary.total_hours, dec("-8.83"));
        let negative: Vec<_> = summary.negative_days().map(|d| d.date).collect();
        assert_eq!(negative, vec![date(2024, 6, 4)]);
    }

    #[test]
    fn test_weekly_hours_validates_shape() {
        let store = store_with_week(time(8, 0), time(17, 0));
        assert_eq!(
            weekly_hours(&store, "10001", date(2024, 6, 3), date(2024, 6, 9)).unwrap(),
            dec("45.00")
        );
        assert!(matches!(
            weekly_hours(&store, "10001", date(2024, 6, 4), date(2024, 6, 9)),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_monthly_hours_uses_calendar_bounds() {
        let store = store_with_week(time(8, 0), time(17, 0));
        store
            .insert(AttendanceRecord::new("10001", date(2024, 5, 31), time(8, 0), time(17, 0)))
            .unwrap();
        store
            .insert(AttendanceRecord::new("10001", date(2024, 6, 30), time(8, 0), time(12, 0)))
            .unwrap();

        let june = YearMonth::new(2024, 6).unwrap();
        assert_eq!(monthly_hours(&store, "10001", june), dec("49.00"));
    }

    #[test]
    fn test_record_attendance_copies_employee_name() {
        let store = InMemoryAttendanceStore::new();
        let mut employee = Employee::new("10001", dec("25000"), dec("100"));
        employee.first_name = Some("Manuel".to_string());
        employee.last_name = Some("Garcia".to_string());
        let directory: InMemoryEmployeeDirectory = vec![employee].into_iter().collect();

        let record = record_attendance(
            &store,
            &directory,
            "10001",
            date(2024, 6, 3),
            time(8, 0),
            time(17, 0),
        )
        .unwrap();

        assert_eq!(record.last_name.as_deref(), Some("Garcia"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_record_attendance_unknown_employee() {
        let store = InMemoryAttendanceStore::new();
        let directory = InMemoryEmployeeDirectory::new();

        let result = record_attendance(
            &store,
            &directory,
            "99999",
            date(2024, 6, 3),
            time(8, 0),
            time(17, 0),
        );
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_attendance_duplicate_day() {
        let store = InMemoryAttendanceStore::new();
        let directory: InMemoryEmployeeDirectory =
            vec![Employee::new("10001", dec("25000"), dec("100"))].into_iter().collect();

        record_attendance(&store, &directory, "10001", date(2024, 6, 3), time(8, 0), time(17, 0))
            .unwrap();
        let result = record_attendance(
            &store,
            &directory,
            "10001",
            date(2024, 6, 3),
            time(9, 0),
            time(18, 0),
        );

        assert!(matches!(result, Err(EngineError::DuplicateAttendance { .. })));
    }

    proptest! {
        #[test]
        fn test_fortnight_is_sum_of_its_weeks(
            punches in prop::collection::vec((0u32..24 * 60, 0u32..24 * 60), 14)
        ) {
            let store = InMemoryAttendanceStore::new();
            let monday = date(2024, 6, 3);
            for (offset, (log_in, log_out)) in punches.iter().enumerate() {
                store
                    .insert(AttendanceRecord::new(
                        "10001",
                        monday + chrono::Days::new(offset as u64),
                        time(log_in / 60, log_in % 60),
                        time(log_out / 60, log_out % 60),
                    ))
                    .unwrap();
            }

            let first = compute_worked_hours(&store, "10001", date(2024, 6, 3), date(2024, 6, 9));
            let second =
                compute_worked_hours(&store, "10001", date(2024, 6, 10), date(2024, 6, 16));
            let both = compute_worked_hours(&store, "10001", date(2024, 6, 3), date(2024, 6, 16));

            prop_assert_eq!(both, first + second);
        }
    }
}
