//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a payroll computation can surface to its caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every operation in the engine returns this error type. Errors halt only
/// the computation that raised them; nothing is retried or recovered.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "10001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: 10001");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Contribution table file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Contribution table file could not be parsed or is incomplete.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The period does not have the shape the operation requires.
    #[error("Invalid period {start} to {end}: {message}")]
    InvalidPeriod {
        /// The first day of the rejected period.
        start: NaiveDate,
        /// The last day of the rejected period.
        end: NaiveDate,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A year-month string or value could not be interpreted.
    #[error("Invalid year-month '{value}': expected YYYY-MM")]
    InvalidYearMonth {
        /// The rejected input.
        value: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The employee exists but a monetary field the computation needs is absent.
    #[error("Missing {field} for employee {employee_id}")]
    MissingSalaryData {
        /// The employee whose record is incomplete.
        employee_id: String,
        /// The missing field (e.g., "basic_salary", "hourly_rate").
        field: String,
    },

    /// No configured bracket covers the salary.
    #[error("{deduction} contribution not found for salary {salary}")]
    BracketNotFound {
        /// The deduction whose table was searched.
        deduction: String,
        /// The salary that fell outside every bracket.
        salary: Decimal,
    },

    /// An attendance record already exists for the employee on that date.
    #[error("Attendance already recorded for employee {employee_id} on {date}")]
    DuplicateAttendance {
        /// The employee of the existing record.
        employee_id: String,
        /// The date of the existing record.
        date: NaiveDate,
    },

    /// An attendance submission could not be turned into a record.
    #[error("Invalid attendance record: {message}")]
    InvalidAttendanceRecord {
        /// A description of what was wrong with the submission.
        message: String,
    },

    /// A monetary amount fell outside the representable decimal range.
    #[error("Amount out of range computing {calculation}")]
    AmountOverflow {
        /// The computation that overflowed.
        calculation: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/contributions.json".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/contributions.json"
        );
    }

    #[test]
    fn test_invalid_period_displays_range_and_message() {
        let error = EngineError::InvalidPeriod {
            start: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
            message: "start date must be a Monday".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid period 2024-06-04 to 2024-06-09: start date must be a Monday"
        );
    }

    #[test]
    fn test_missing_salary_data_displays_field() {
        let error = EngineError::MissingSalaryData {
            employee_id: "10001".to_string(),
            field: "hourly_rate".to_string(),
        };
        assert_eq!(error.to_string(), "Missing hourly_rate for employee 10001");
    }

    #[test]
    fn test_bracket_not_found_displays_deduction_and_salary() {
        let error = EngineError::BracketNotFound {
            deduction: "SSS".to_string(),
            salary: Decimal::from_str("1000000.00").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "SSS contribution not found for salary 1000000.00"
        );
    }

    #[test]
    fn test_duplicate_attendance_displays_key() {
        let error = EngineError::DuplicateAttendance {
            employee_id: "10001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Attendance already recorded for employee 10001 on 2024-06-03"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_employee_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_employee_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }

    #[test]
    fn test_amount_overflow_displays_calculation() {
        let error = EngineError::AmountOverflow {
            calculation: "gross pay".to_string(),
        };
        assert_eq!(error.to_string(), "Amount out of range computing gross pay");
    }
}
