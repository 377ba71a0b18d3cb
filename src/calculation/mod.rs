//! Calculation logic for the payroll engine.
//!
//! This module contains the payroll pipeline: converting attendance punches
//! into worked hours with the late penalty, deriving weekly and monthly
//! cutoffs from stored attendance, looking up statutory contributions,
//! computing withholding tax, and combining them into gross and net pay.

mod contributions;
mod cutoffs;
mod deductions;
mod rounding;
mod salary;
mod time_accounting;
mod validation;
mod withholding_tax;

pub use contributions::{
    CONTRIBUTION_WEEKS_PER_MONTH, PAGIBIG_MAX_CONTRIBUTION, monthly_flat_contribution,
    monthly_housing_fund, weekly_contribution,
};
pub use cutoffs::{monthly_cutoffs, monthly_cutoffs_between, weekly_cutoffs, weekly_cutoffs_between};
pub use deductions::DeductionEngine;
pub use rounding::{MINUTES_PER_HOUR, minutes_to_hours, round_half_up};
pub use salary::{SalaryEngine, gross_pay};
pub use time_accounting::{
    DailyHours, GRACE_PERIOD_END, WorkedHoursSummary, compute_worked_hours, daily_hours,
    daily_worked_hours, late_penalty_hours, monthly_hours, record_attendance,
    summarize_worked_hours, weekly_hours, worked_hours_summary,
};
pub use validation::{is_valid_week, validate_week};
pub use withholding_tax::{
    MONTHLY_TAX_BANDS, TAX_WEEKS_PER_MONTH, TaxBand, WEEKLY_TAX_BANDS, monthly_withholding_tax,
    tax_for_bands, weekly_tax_base, weekly_withholding_tax,
};
