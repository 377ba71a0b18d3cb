//! Gross and net pay.
//!
//! Gross pay is the employee's hourly rate times the hours worked in the
//! period. Net pay is gross pay less the four statutory deductions for the
//! same employee and period. A deduction that fails fails the whole net
//! computation; nothing is silently zeroed.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ContributionTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, AuditWarning, DeductionBreakdown, DeductionKind, MonthPeriod, PayrollResult,
    Period, WeekPeriod, YearMonth,
};
use crate::store::{AttendanceStore, EmployeeDirectory};

use super::deductions::DeductionEngine;
use super::rounding::round_half_up;
use super::time_accounting::{WorkedHoursSummary, worked_hours_summary};
use super::validation::validate_week;

/// Gross pay for `hours` at `hourly_rate`, two decimals half-up.
///
/// Fails with `AmountOverflow` when the product is out of range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::gross_pay;
/// use rust_decimal::Decimal;
///
/// let gross = gross_pay(Decimal::new(100, 0), Decimal::new(4500, 2)).unwrap();
/// assert_eq!(gross.to_string(), "4500.00");
/// assert!(gross_pay(Decimal::MAX, Decimal::new(9, 0)).is_err());
/// ```
pub fn gross_pay(hourly_rate: Decimal, hours: Decimal) -> EngineResult<Decimal> {
    hourly_rate
        .checked_mul(hours)
        .map(round_half_up)
        .ok_or_else(|| EngineError::AmountOverflow {
            calculation: format!("gross pay for {} hours at {}", hours, hourly_rate),
        })
}

/// Computes gross and net pay from attendance, employee data and the
/// contribution tables.
#[derive(Clone, Copy)]
pub struct SalaryEngine<'a> {
    attendance: &'a dyn AttendanceStore,
    deductions: DeductionEngine<'a>,
}

impl<'a> SalaryEngine<'a> {
    /// Creates an engine over the given collaborators.
    pub fn new(
        tables: &'a ContributionTables,
        attendance: &'a dyn AttendanceStore,
        employees: &'a dyn EmployeeDirectory,
    ) -> Self {
        Self {
            attendance,
            deductions: DeductionEngine::new(tables, employees),
        }
    }

    /// The deduction engine sharing this engine's tables and directory.
    pub fn deductions(&self) -> &DeductionEngine<'a> {
        &self.deductions
    }

    /// Gross pay for a Monday-to-Sunday week.
    ///
    /// The period shape is checked first (`InvalidPeriod`), then the
    /// employee (`EmployeeNotFound`) and their hourly rate
    /// (`MissingSalaryData`).
    pub fn gross_weekly(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Decimal> {
        validate_week(start, end)?;
        self.gross_for_range(employee_id, start, end)
            .map(|(_, _, gross)| gross)
    }

    /// Gross pay for a calendar month.
    pub fn gross_monthly(&self, employee_id: &str, year_month: YearMonth) -> EngineResult<Decimal> {
        self.gross_for_range(employee_id, year_month.first_day(), year_month.last_day())
            .map(|(_, _, gross)| gross)
    }

    /// Full pay breakdown for a Monday-to-Sunday week.
    pub fn net_weekly(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<PayrollResult> {
        validate_week(start, end)?;
        let period = Period::Week(WeekPeriod {
            start_date: start,
            end_date: end,
        });
        self.net_pay(employee_id, period)
    }

    /// Full pay breakdown for a calendar month.
    pub fn net_monthly(
        &self,
        employee_id: &str,
        year_month: YearMonth,
    ) -> EngineResult<PayrollResult> {
        self.net_pay(employee_id, Period::Month(MonthPeriod::full(year_month)))
    }

    fn gross_for_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<(Decimal, WorkedHoursSummary, Decimal)> {
        let hourly_rate = self.deductions.employee(employee_id)?.require_hourly_rate()?;
        let hours = worked_hours_summary(self.attendance, employee_id, start, end);
        let gross = gross_pay(hourly_rate, hours.total_hours)?;

        debug!(
            employee_id = %employee_id,
            start = %start,
            end = %end,
            hourly_rate = %hourly_rate,
            worked_hours = %hours.total_hours,
            gross_pay = %gross,
            "Computed gross pay"
        );
        Ok((hourly_rate, hours, gross))
    }

    fn net_pay(&self, employee_id: &str, period: Period) -> EngineResult<PayrollResult> {
        let start_time = Instant::now();
        let mut trace = AuditTrace::default();

        let (hourly_rate, hours, gross) =
            self.gross_for_range(employee_id, period.start_date(), period.end_date())?;

        trace.record(
            "worked_hours",
            "Worked Hours",
            serde_json::json!({
                "start_date": period.start_date().to_string(),
                "end_date": period.end_date().to_string(),
                "days": hours.days.len(),
            }),
            serde_json::json!({
                "worked_hours": hours.total_hours.to_string(),
                "late_penalty_hours": hours
                    .days
                    .iter()
                    .map(|day| day.late_penalty_hours)
                    .sum::<Decimal>()
                    .to_string(),
            }),
            format!(
                "Summed {} day(s) of attendance after late penalties: {} hours",
                hours.days.len(),
                hours.total_hours
            ),
        );
        for day in hours.negative_days() {
            warn!(
                employee_id = %employee_id,
                date = %day.date,
                worked_hours = %day.worked_hours,
                "Negative worked hours"
            );
            trace.warnings.push(AuditWarning {
                code: "NEGATIVE_DAILY_HOURS".to_string(),
                message: format!(
                    "Worked hours on {} are {}; log-out precedes log-in or the late penalty exceeds the day",
                    day.date, day.worked_hours
                ),
                severity: "medium".to_string(),
            });
        }

        trace.record(
            "gross_pay",
            "Gross Pay",
            serde_json::json!({
                "hourly_rate": hourly_rate.to_string(),
                "worked_hours": hours.total_hours.to_string(),
            }),
            serde_json::json!({ "gross_pay": gross.to_string() }),
            format!("{} hours x {} = {}", hours.total_hours, hourly_rate, gross),
        );

        let salary = self.deductions.employee(employee_id)?.require_basic_salary()?;
        let deductions = match period {
            Period::Week(_) => self.deductions.weekly_breakdown_for_salary(salary)?,
            Period::Month(_) => self.deductions.monthly_breakdown_for_salary(salary)?,
        };
        record_deductions(&mut trace, &period, salary, &deductions);

        let total_deductions = deductions.total();
        let net_pay = gross.checked_sub(total_deductions).ok_or_else(|| {
            EngineError::AmountOverflow {
                calculation: format!("net pay for employee {}", employee_id),
            }
        })?;
        trace.record(
            "net_pay",
            "Net Pay",
            serde_json::json!({
                "gross_pay": gross.to_string(),
                "total_deductions": total_deductions.to_string(),
            }),
            serde_json::json!({ "net_pay": net_pay.to_string() }),
            format!("{} - {} = {}", gross, total_deductions, net_pay),
        );
        trace.duration_us = start_time.elapsed().as_micros() as u64;

        debug!(
            employee_id = %employee_id,
            gross_pay = %gross,
            total_deductions = %total_deductions,
            net_pay = %net_pay,
            "Computed net pay"
        );

        Ok(PayrollResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: employee_id.to_string(),
            period,
            worked_hours: hours.total_hours,
            gross_pay: gross,
            deductions,
            total_deductions,
            net_pay,
            audit_trace: trace,
        })
    }
}

fn record_deductions(
    trace: &mut AuditTrace,
    period: &Period,
    salary: Decimal,
    deductions: &DeductionBreakdown,
) {
    let cadence = match period {
        Period::Week(_) => "weekly",
        Period::Month(_) => "monthly",
    };

    for kind in DeductionKind::ALL {
        let amount = deductions.get(kind);
        let reasoning = match (kind, period) {
            (DeductionKind::WithholdingTax, Period::Week(_)) => format!(
                "Weekly tax on salary / 4.33 less the weekly contributions: {}",
                amount
            ),
            (DeductionKind::WithholdingTax, Period::Month(_)) => format!(
                "Monthly tax on salary less the monthly contributions: {}",
                amount
            ),
            (_, Period::Week(_)) => format!(
                "Monthly {} bracket amount / 4 = {}",
                kind.label(),
                amount
            ),
            (_, Period::Month(_)) => {
                format!("{} bracket amount for salary {}: {}", kind.label(), salary, amount)
            }
        };

        trace.record(
            kind.slug(),
            kind.label(),
            serde_json::json!({
                "basic_salary": salary.to_string(),
                "cadence": cadence,
            }),
            serde_json::json!({ "amount": amount.to_string() }),
            reasoning,
        );
    }
}
