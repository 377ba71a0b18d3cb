//! Employee model.
//!
//! Only the monetary attributes the payroll pipeline consumes are modelled;
//! the rest of an employee profile lives with the directory that owns it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee as seen by the payroll computations.
///
/// Both monetary fields are optional so that an incomplete master record
/// surfaces as [`EngineError::MissingSalaryData`] instead of a silent zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// External, unique employee number.
    pub employee_id: String,
    /// Given name, carried for display only.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name, carried for display only.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Basic monthly salary; the base for every statutory deduction.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// Hourly rate; the base for gross pay.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl Employee {
    /// Creates an employee with both monetary attributes set.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("10001", Decimal::new(25000, 0), Decimal::new(100, 0));
    /// assert_eq!(employee.basic_salary, Some(Decimal::new(25000, 0)));
    /// ```
    pub fn new(
        employee_id: impl Into<String>,
        basic_salary: Decimal,
        hourly_rate: Decimal,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            first_name: None,
            last_name: None,
            basic_salary: Some(basic_salary),
            hourly_rate: Some(hourly_rate),
        }
    }

    /// Returns the basic salary or `MissingSalaryData`.
    pub fn require_basic_salary(&self) -> EngineResult<Decimal> {
        self.basic_salary
            .ok_or_else(|| EngineError::MissingSalaryData {
                employee_id: self.employee_id.clone(),
                field: "basic_salary".to_string(),
            })
    }

    /// Returns the hourly rate or `MissingSalaryData`.
    pub fn require_hourly_rate(&self) -> EngineResult<Decimal> {
        self.hourly_rate
            .ok_or_else(|| EngineError::MissingSalaryData {
                employee_id: self.employee_id.clone(),
                field: "hourly_rate".to_string(),
            })
    }
}
