//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler parses its inputs, delegates to the calculation module, and
//! converts engine errors into [`ApiErrorResponse`] bodies.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    monthly_cutoffs, monthly_hours, record_attendance, weekly_cutoffs, weekly_hours,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{DeductionKind, MonthPeriod, Period, WeekPeriod};

use super::request::{
    AttendanceRequest, DateRangeQuery, EmployeeMonthQuery, EmployeeRangeQuery, YearMonthQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, DeductionResponse, GrossPayResponse, HoursResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance", get(list_attendance_handler).post(create_attendance_handler))
        .route("/attendance/weekly-cutoffs", get(weekly_cutoffs_handler))
        .route("/attendance/monthly-cutoffs", get(monthly_cutoffs_handler))
        .route("/attendance/:employee_id", get(employee_attendance_handler))
        .route("/attendance/:employee_id/weekly-hours", get(weekly_hours_handler))
        .route("/attendance/:employee_id/monthly-hours", get(monthly_hours_handler))
        .route("/deductions/weekly/:deduction", get(weekly_deduction_handler))
        .route("/deductions/monthly/:deduction", get(monthly_deduction_handler))
        .route("/salary/weekly/gross", get(weekly_gross_handler))
        .route("/salary/weekly/net", get(weekly_net_handler))
        .route("/salary/monthly/gross", get(monthly_gross_handler))
        .route("/salary/monthly/net", get(monthly_net_handler))
        .with_state(state)
}

/// Turns an engine result into a JSON response, logging failures.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Rejects a request whose query string could not be deserialized.
fn query_rejected(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn parse_deduction(correlation_id: Uuid, slug: &str) -> Result<DeductionKind, Response> {
    slug.parse::<DeductionKind>().map_err(|_| {
        warn!(correlation_id = %correlation_id, deduction = %slug, "Unknown deduction");
        ApiErrorResponse::bad_request(ApiError::unknown_deduction(slug)).into_response()
    })
}

fn week_period(start_date: NaiveDate, end_date: NaiveDate) -> Period {
    Period::Week(WeekPeriod {
        start_date,
        end_date,
    })
}

/// Handler for `POST /attendance`.
async fn create_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance submission");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let result = request.parse().and_then(|(date, log_in, log_out)| {
        record_attendance(
            state.attendance(),
            state.employees(),
            &request.employee_id,
            date,
            log_in,
            log_out,
        )
    });
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for `GET /attendance`: every employee's records in a range.
async fn list_attendance_handler(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let records = state
        .attendance()
        .find_all_by_range(query.start_date, query.end_date);
    info!(
        correlation_id = %correlation_id,
        start_date = %query.start_date,
        end_date = %query.end_date,
        records = records.len(),
        "Listed attendance"
    );
    respond(correlation_id, StatusCode::OK, Ok(records))
}

/// Handler for `GET /attendance/:employee_id`.
async fn employee_attendance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = state
        .employees()
        .find_by_employee_id(&employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.clone(),
        })
        .map(|_| {
            state
                .attendance()
                .find_by_employee_and_range(&employee_id, query.start_date, query.end_date)
        });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /attendance/weekly-cutoffs`.
async fn weekly_cutoffs_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let cutoffs = weekly_cutoffs(state.attendance());
    info!(correlation_id = %correlation_id, count = cutoffs.len(), "Listed weekly cutoffs");
    respond(correlation_id, StatusCode::OK, Ok(cutoffs))
}

/// Handler for `GET /attendance/monthly-cutoffs`.
async fn monthly_cutoffs_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let cutoffs = monthly_cutoffs(state.attendance());
    info!(correlation_id = %correlation_id, count = cutoffs.len(), "Listed monthly cutoffs");
    respond(correlation_id, StatusCode::OK, Ok(cutoffs))
}

/// Handler for `GET /attendance/:employee_id/weekly-hours`.
async fn weekly_hours_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = weekly_hours(state.attendance(), &employee_id, query.start_date, query.end_date)
        .map(|worked_hours| HoursResponse {
            employee_id: employee_id.clone(),
            period: week_period(query.start_date, query.end_date),
            worked_hours,
        });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /attendance/:employee_id/monthly-hours`.
async fn monthly_hours_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<YearMonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = query.year_month().map(|year_month| HoursResponse {
        employee_id: employee_id.clone(),
        period: Period::Month(MonthPeriod::full(year_month)),
        worked_hours: monthly_hours(state.attendance(), &employee_id, year_month),
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /deductions/weekly/:deduction`.
async fn weekly_deduction_handler(
    State(state): State<AppState>,
    Path(deduction): Path<String>,
    query: Result<Query<EmployeeRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let kind = match parse_deduction(correlation_id, &deduction) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let engine = state.salary_engine();
    let result = engine
        .deductions()
        .weekly(kind, &query.employee_id, query.start_date, query.end_date)
        .map(|amount| DeductionResponse {
            employee_id: query.employee_id.clone(),
            deduction: kind,
            period: week_period(query.start_date, query.end_date),
            amount,
        });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /deductions/monthly/:deduction`.
async fn monthly_deduction_handler(
    State(state): State<AppState>,
    Path(deduction): Path<String>,
    query: Result<Query<EmployeeMonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let kind = match parse_deduction(correlation_id, &deduction) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let engine = state.salary_engine();
    let result = query.year_month().and_then(|year_month| {
        engine
            .deductions()
            .monthly(kind, &query.employee_id, year_month)
            .map(|amount| DeductionResponse {
                employee_id: query.employee_id.clone(),
                deduction: kind,
                period: Period::Month(MonthPeriod::full(year_month)),
                amount,
            })
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /salary/weekly/gross`.
async fn weekly_gross_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = state
        .salary_engine()
        .gross_weekly(&query.employee_id, query.start_date, query.end_date)
        .map(|gross_pay| GrossPayResponse {
            employee_id: query.employee_id.clone(),
            period: week_period(query.start_date, query.end_date),
            gross_pay,
        });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /salary/monthly/gross`.
async fn monthly_gross_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeMonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = query.year_month().and_then(|year_month| {
        state
            .salary_engine()
            .gross_monthly(&query.employee_id, year_month)
            .map(|gross_pay| GrossPayResponse {
                employee_id: query.employee_id.clone(),
                period: Period::Month(MonthPeriod::full(year_month)),
                gross_pay,
            })
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /salary/weekly/net`.
async fn weekly_net_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = state
        .salary_engine()
        .net_weekly(&query.employee_id, query.start_date, query.end_date);
    if let Ok(payroll) = &result {
        info!(
            correlation_id = %correlation_id,
            employee_id = %payroll.employee_id,
            gross_pay = %payroll.gross_pay,
            net_pay = %payroll.net_pay,
            duration_us = payroll.audit_trace.duration_us,
            "Weekly net pay computed"
        );
    }
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /salary/monthly/net`.
async fn monthly_net_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeMonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = query
        .year_month()
        .and_then(|year_month| state.salary_engine().net_monthly(&query.employee_id, year_month));
    if let Ok(payroll) = &result {
        info!(
            correlation_id = %correlation_id,
            employee_id = %payroll.employee_id,
            gross_pay = %payroll.gross_pay,
            net_pay = %payroll.net_pay,
            duration_us = payroll.audit_trace.duration_us,
            "Monthly net pay computed"
        );
    }
    respond(correlation_id, StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{AttendanceRecord, Employee};
    use crate::store::{AttendanceStore, InMemoryAttendanceStore, InMemoryEmployeeDirectory};
    use axum::{body::Body, http::Request};
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let tables = ConfigLoader::load("./config/contributions.json")
            .expect("Failed to load config")
            .into_tables();
        let attendance = InMemoryAttendanceStore::new();
        for day in 3..=7 {
            attendance
                .insert(AttendanceRecord::new(
                    "10001",
                    NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                ))
                .unwrap();
        }
        let employees: InMemoryEmployeeDirectory =
            vec![Employee::new("10001", Decimal::new(25000, 0), Decimal::new(100, 0))]
                .into_iter()
                .collect();
        AppState::new(tables, Arc::new(attendance), Arc::new(employees))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_weekly_gross_returns_200() {
        let (status, body) = get_json(
            "/salary/weekly/gross?employee_id=10001&start_date=2024-06-03&end_date=2024-06-09",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gross_pay"], "4500.00");
        assert_eq!(body["period"]["kind"], "week");
    }

    #[tokio::test]
    async fn test_weekly_gross_invalid_period_returns_400() {
        let (status, body) = get_json(
            "/salary/weekly/gross?employee_id=10001&start_date=2024-06-04&end_date=2024-06-09",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_missing_query_parameter_returns_400() {
        let (status, body) = get_json("/salary/weekly/gross?employee_id=10001").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_deduction_returns_400() {
        let (status, body) = get_json(
            "/deductions/monthly/gsis?employee_id=10001&year_month=2024-06",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNKNOWN_DEDUCTION");
    }

    #[tokio::test]
    async fn test_bad_year_month_returns_400() {
        let (status, body) = get_json("/attendance/10001/monthly-hours?year_month=2024-13").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_YEAR_MONTH");
    }

    #[tokio::test]
    async fn test_static_segment_wins_over_employee_id() {
        let (status, body) = get_json("/attendance/weekly-cutoffs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["start_date"], "2024-06-03");
        assert_eq!(body[0]["end_date"], "2024-06-07");
    }
}
