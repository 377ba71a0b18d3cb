//! Attendance record model.
//!
//! An attendance record is one day's punch-in and punch-out for one
//! employee. Records are immutable once stored.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single day's logged attendance.
///
/// `log_out` is always interpreted on the same day as `log_in`; there is no
/// overnight-shift handling. `(employee_id, date)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the punches belong to.
    pub employee_id: String,
    /// Given name at the time of the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name at the time of the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// The calendar day worked.
    pub date: NaiveDate,
    /// Time of day the employee logged in.
    pub log_in: NaiveTime,
    /// Time of day the employee logged out.
    pub log_out: NaiveTime,
}

impl AttendanceRecord {
    /// Creates a record without the denormalized name fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::AttendanceRecord;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let record = AttendanceRecord::new(
    ///     "10001",
    ///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    /// );
    /// assert_eq!(record.worked_minutes(), 540);
    /// ```
    pub fn new(
        employee_id: impl Into<String>,
        date: NaiveDate,
        log_in: NaiveTime,
        log_out: NaiveTime,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            first_name: None,
            last_name: None,
            date,
            log_in,
            log_out,
        }
    }

    /// Minutes between log-in and log-out on the same day.
    ///
    /// Negative when `log_out` precedes `log_in`.
    pub fn worked_minutes(&self) -> i64 {
        (self.log_out - self.log_in).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_worked_minutes_full_day() {
        let record = AttendanceRecord::new("10001", date(), time(8, 0), time(17, 0));
        assert_eq!(record.worked_minutes(), 540);
    }

    #[test]
    fn test_worked_minutes_negative_when_logout_precedes_login() {
        let record = AttendanceRecord::new("10001", date(), time(22, 0), time(6, 0));
        assert_eq!(record.worked_minutes(), -960);
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "employee_id": "10001",
            "last_name": "Garcia",
            "first_name": "Manuel",
            "date": "2024-06-03",
            "log_in": "08:59:00",
            "log_out": "18:31:00"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, date());
        assert_eq!(record.log_in, time(8, 59));
        assert_eq!(record.log_out, time(18, 31));
        assert_eq!(record.first_name.as_deref(), Some("Manuel"));
    }

    #[test]
    fn test_serialize_skips_missing_names() {
        let record = AttendanceRecord::new("10001", date(), time(8, 0), time(17, 0));
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("first_name"));
        assert!(json.contains("\"log_in\":\"08:00:00\""));
    }
}
