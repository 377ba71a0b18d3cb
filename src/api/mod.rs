//! HTTP API module for the payroll engine.
//!
//! This module provides a thin REST adapter over the calculation module:
//! attendance submission and queries, cutoff listings, worked hours,
//! statutory deductions, and gross and net pay.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ATTENDANCE_DATE_FORMAT, ATTENDANCE_TIME_FORMAT, AttendanceRequest, DateRangeQuery,
    EmployeeMonthQuery, EmployeeRangeQuery, YearMonthQuery,
};
pub use response::{ApiError, ApiErrorResponse, DeductionResponse, GrossPayResponse, HoursResponse};
pub use state::AppState;
