//! Request types for the payroll HTTP API.
//!
//! This module defines the JSON body accepted by `POST /attendance` and the
//! query strings accepted by the read endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::YearMonth;

/// Date format accepted in attendance submissions.
pub const ATTENDANCE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Time format accepted in attendance submissions.
pub const ATTENDANCE_TIME_FORMAT: &str = "%H:%M";

/// Request body for `POST /attendance`.
///
/// Dates are written `MM/dd/yyyy` and times `HH:mm`, matching the
/// attendance sheets punches are transcribed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// The employee the punches belong to.
    pub employee_id: String,
    /// Day worked, `MM/dd/yyyy`.
    pub date: String,
    /// Log-in time, `HH:mm`.
    pub log_in: String,
    /// Log-out time, `HH:mm`.
    pub log_out: String,
}

impl AttendanceRequest {
    /// Parses the date and the two punch times.
    ///
    /// Fails with `InvalidAttendanceRecord` naming the offending field.
    pub fn parse(&self) -> EngineResult<(NaiveDate, NaiveTime, NaiveTime)> {
        let date = NaiveDate::parse_from_str(self.date.trim(), ATTENDANCE_DATE_FORMAT).map_err(
            |e| EngineError::InvalidAttendanceRecord {
                message: format!("date '{}' is not MM/dd/yyyy: {}", self.date, e),
            },
        )?;
        let log_in = parse_time("log_in", &self.log_in)?;
        let log_out = parse_time("log_out", &self.log_out)?;
        Ok((date, log_in, log_out))
    }
}

fn parse_time(field: &str, value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), ATTENDANCE_TIME_FORMAT).map_err(|e| {
        EngineError::InvalidAttendanceRecord {
            message: format!("{} '{}' is not HH:mm: {}", field, value, e),
        }
    })
}

/// Query string for endpoints over an inclusive ISO date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeQuery {
    /// First day of the range, `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Last day of the range, `YYYY-MM-DD`.
    pub end_date: NaiveDate,
}

/// Query string for endpoints over a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearMonthQuery {
    /// The month, `YYYY-MM`.
    pub year_month: String,
}

impl YearMonthQuery {
    /// Parses the month, failing with `InvalidYearMonth`.
    pub fn year_month(&self) -> EngineResult<YearMonth> {
        self.year_month.parse()
    }
}

/// Query string for per-employee endpoints over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRangeQuery {
    /// The employee to compute for.
    pub employee_id: String,
    /// First day of the range, `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Last day of the range, `YYYY-MM-DD`.
    pub end_date: NaiveDate,
}

/// Query string for per-employee endpoints over a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeMonthQuery {
    /// The employee to compute for.
    pub employee_id: String,
    /// The month, `YYYY-MM`.
    pub year_month: String,
}

impl EmployeeMonthQuery {
    /// Parses the month, failing with `InvalidYearMonth`.
    pub fn year_month(&self) -> EngineResult<YearMonth> {
        self.year_month.parse()
    }
}
