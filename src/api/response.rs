//! Response types for the payroll HTTP API.
//!
//! This module defines the success bodies for the scalar endpoints, the
//! error response structures, and the mapping from engine errors to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DeductionKind, Period};

/// Worked hours for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursResponse {
    /// The employee the hours belong to.
    pub employee_id: String,
    /// The period the hours cover.
    pub period: Period,
    /// Worked hours after late penalties.
    pub worked_hours: Decimal,
}

/// One statutory deduction for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResponse {
    /// The employee the deduction applies to.
    pub employee_id: String,
    /// Which deduction was computed.
    pub deduction: DeductionKind,
    /// The period the deduction covers.
    pub period: Period,
    /// The deducted amount.
    pub amount: Decimal,
}

/// Gross pay for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossPayResponse {
    /// The employee the pay belongs to.
    pub employee_id: String,
    /// The period the pay covers.
    pub period: Period,
    /// Hourly rate times worked hours.
    pub gross_pay: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unknown deduction error response.
    pub fn unknown_deduction(slug: &str) -> Self {
        Self::with_details(
            "UNKNOWN_DEDUCTION",
            format!("Unknown deduction: {}", slug),
            "Expected one of sss, philhealth, pagibig, withholding-tax",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_PERIOD",
                    message,
                    "Weekly periods must start on a Monday and end on a Sunday",
                ))
            }
            EngineError::InvalidYearMonth { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_YEAR_MONTH", message))
            }
            EngineError::EmployeeNotFound { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("EMPLOYEE_NOT_FOUND", message))
            }
            EngineError::MissingSalaryData { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "MISSING_SALARY_DATA",
                    message,
                    "The employee record is incomplete",
                ))
            }
            EngineError::BracketNotFound { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "BRACKET_NOT_FOUND",
                    message,
                    "No configured contribution bracket covers this salary",
                ))
            }
            EngineError::DuplicateAttendance { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("DUPLICATE_ATTENDANCE", message))
            }
            EngineError::InvalidAttendanceRecord { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_ATTENDANCE", message))
            }
            EngineError::AmountOverflow { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    message,
                    "Stored salary data produced an amount out of range",
                ),
            },
        }
    }
}
