//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod deduction;
mod employee;
mod payroll_result;
mod period;

pub use attendance::AttendanceRecord;
pub use deduction::{DeductionBreakdown, DeductionKind};
pub use employee::Employee;
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, PayrollResult};
pub use period::{MonthPeriod, Period, WeekPeriod, YearMonth};
