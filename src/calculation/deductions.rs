//! Statutory deduction engine.
//!
//! The engine is stateless: it borrows the contribution tables and the
//! employee directory and computes each deduction on demand. Every
//! deduction is derived from the employee's basic monthly salary; the
//! period only selects the weekly or monthly cadence.
//!
//! Withholding tax is levied on salary net of the other three deductions
//! for the same cadence, so the tax figure always agrees with the three
//! contributions reported beside it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ContributionTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{DeductionBreakdown, DeductionKind, Employee, YearMonth};
use crate::store::EmployeeDirectory;

use super::contributions::{monthly_flat_contribution, monthly_housing_fund, weekly_contribution};
use super::validation::validate_week;
use super::withholding_tax::{monthly_withholding_tax, weekly_tax_base, weekly_withholding_tax};

/// Computes statutory deductions for employees in a directory.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::DeductionEngine;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Employee, YearMonth};
/// use payroll_engine::store::InMemoryEmployeeDirectory;
/// use rust_decimal::Decimal;
///
/// let tables = ConfigLoader::load("./config/contributions.json")?.into_tables();
/// let employees: InMemoryEmployeeDirectory =
///     vec![Employee::new("10001", Decimal::new(25000, 0), Decimal::new(100, 0))]
///         .into_iter()
///         .collect();
///
/// let engine = DeductionEngine::new(&tables, &employees);
/// let sss = engine.monthly_sss("10001", "2024-06".parse::<YearMonth>()?)?;
/// assert_eq!(sss, Decimal::new(112500, 2));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Clone, Copy)]
pub struct DeductionEngine<'a> {
    tables: &'a ContributionTables,
    employees: &'a dyn EmployeeDirectory,
}

impl<'a> DeductionEngine<'a> {
    /// Creates an engine over the given tables and directory.
    pub fn new(tables: &'a ContributionTables, employees: &'a dyn EmployeeDirectory) -> Self {
        Self { tables, employees }
    }

    /// The contribution tables in use.
    pub fn tables(&self) -> &'a ContributionTables {
        self.tables
    }

    /// Looks the employee up, failing with `EmployeeNotFound`.
    pub fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .find_by_employee_id(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn basic_salary(&self, employee_id: &str) -> EngineResult<Decimal> {
        self.employee(employee_id)?.require_basic_salary()
    }

    // Salary-level computations.

    /// Monthly amount of the three contributions for `salary`.
    fn monthly_contributions(&self, salary: Decimal) -> EngineResult<DeductionBreakdown> {
        Ok(DeductionBreakdown {
            sss: monthly_flat_contribution(DeductionKind::Sss, self.tables.sss(), salary)?,
            philhealth: monthly_flat_contribution(
                DeductionKind::Philhealth,
                self.tables.philhealth(),
                salary,
            )?,
            pagibig: monthly_housing_fund(self.tables.pagibig(), salary)?,
            withholding_tax: Decimal::ZERO,
        })
    }

    /// All four monthly deductions for a basic monthly salary.
    pub fn monthly_breakdown_for_salary(
        &self,
        salary: Decimal,
    ) -> EngineResult<DeductionBreakdown> {
        let mut breakdown = self.monthly_contributions(salary)?;
        let taxable = salary - breakdown.total();
        breakdown.withholding_tax = monthly_withholding_tax(taxable);

        debug!(
            salary = %salary,
            taxable = %taxable,
            withholding_tax = %breakdown.withholding_tax,
            "Computed monthly deductions"
        );
        Ok(breakdown)
    }

    /// All four weekly deductions for a basic monthly salary.
    ///
    /// Contributions are the monthly amounts over four; the tax base is the
    /// monthly salary over 4.33.
    pub fn weekly_breakdown_for_salary(&self, salary: Decimal) -> EngineResult<DeductionBreakdown> {
        let monthly = self.monthly_contributions(salary)?;
        let mut breakdown = DeductionBreakdown {
            sss: weekly_contribution(monthly.sss),
            philhealth: weekly_contribution(monthly.philhealth),
            pagibig: weekly_contribution(monthly.pagibig),
            withholding_tax: Decimal::ZERO,
        };

        let weekly_salary = weekly_tax_base(salary);
        let taxable = weekly_salary - breakdown.total();
        breakdown.withholding_tax = weekly_withholding_tax(taxable);

        debug!(
            salary = %salary,
            weekly_salary = %weekly_salary,
            taxable = %taxable,
            withholding_tax = %breakdown.withholding_tax,
            "Computed weekly deductions"
        );
        Ok(breakdown)
    }

    /// One monthly deduction for a basic monthly salary.
    pub fn monthly_for_salary(
        &self,
        kind: DeductionKind,
        salary: Decimal,
    ) -> EngineResult<Decimal> {
        match kind {
            DeductionKind::Sss => monthly_flat_contribution(kind, self.tables.sss(), salary),
            DeductionKind::Philhealth => {
                monthly_flat_contribution(kind, self.tables.philhealth(), salary)
            }
            DeductionKind::Pagibig => monthly_housing_fund(self.tables.pagibig(), salary),
            DeductionKind::WithholdingTax => {
                Ok(self.monthly_breakdown_for_salary(salary)?.withholding_tax)
            }
        }
    }

    /// One weekly deduction for a basic monthly salary.
    pub fn weekly_for_salary(&self, kind: DeductionKind, salary: Decimal) -> EngineResult<Decimal> {
        match kind {
            DeductionKind::WithholdingTax => {
                Ok(self.weekly_breakdown_for_salary(salary)?.withholding_tax)
            }
            _ => Ok(weekly_contribution(self.monthly_for_salary(kind, salary)?)),
        }
    }

    // Employee-level computations.

    /// One weekly deduction for an employee.
    ///
    /// Fails with `InvalidPeriod` unless `start` is a Monday and `end` a
    /// Sunday, then with `EmployeeNotFound` or `MissingSalaryData`.
    pub fn weekly(
        &self,
        kind: DeductionKind,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Decimal> {
        validate_week(start, end)?;
        let salary = self.basic_salary(employee_id)?;
        self.weekly_for_salary(kind, salary)
    }

    /// One monthly deduction for an employee.
    pub fn monthly(
        &self,
        kind: DeductionKind,
        employee_id: &str,
        year_month: YearMonth,
    ) -> EngineResult<Decimal> {
        debug!(
            employee_id = %employee_id,
            year_month = %year_month,
            deduction = %kind,
            "Computing monthly deduction"
        );
        let salary = self.basic_salary(employee_id)?;
        self.monthly_for_salary(kind, salary)
    }

    /// All four weekly deductions for an employee.
    pub fn weekly_breakdown(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<DeductionBreakdown> {
        validate_week(start, end)?;
        let salary = self.basic_salary(employee_id)?;
        self.weekly_breakdown_for_salary(salary)
    }

    /// All four monthly deductions for an employee.
    pub fn monthly_breakdown(
        &self,
        employee_id: &str,
        year_month: YearMonth,
    ) -> EngineResult<DeductionBreakdown> {
        debug!(
            employee_id = %employee_id,
            year_month = %year_month,
            "Computing monthly deductions"
        );
        let salary = self.basic_salary(employee_id)?;
        self.monthly_breakdown_for_salary(salary)
    }

    /// Weekly SSS contribution.
    pub fn weekly_sss(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Decimal> {
        self.weekly(DeductionKind::Sss, employee_id, start, end)
    }

    /// Weekly PhilHealth premium.
    pub fn weekly_philhealth(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Decimal> {
        self.weekly(DeductionKind::Philhealth, employee_id, start, end)
    }

    /// Weekly Pag-IBIG contribution.
    pub fn weekly_pagibig(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Decimal> {
        self.weekly(DeductionKind::Pagibig, employee_id, start, end)
    }

    /// Weekly withholding tax.
    pub fn weekly_withholding_tax(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Decimal> {
        self.weekly(DeductionKind::WithholdingTax, employee_id, start, end)
    }

    /// Monthly SSS contribution.
    pub fn monthly_sss(&self, employee_id: &str, year_month: YearMonth) -> EngineResult<Decimal> {
        self.monthly(DeductionKind::Sss, employee_id, year_month)
    }

    /// Monthly PhilHealth premium.
    pub fn monthly_philhealth(
        &self,
        employee_id: &str,
        year_month: YearMonth,
    ) -> EngineResult<Decimal> {
        self.monthly(DeductionKind::Philhealth, employee_id, year_month)
    }

    /// Monthly Pag-IBIG contribution.
    pub fn monthly_pagibig(
        &self,
        employee_id: &str,
        year_month: YearMonth,
    ) -> EngineResult<Decimal> {
        self.monthly(DeductionKind::Pagibig, employee_id, year_month)
    }

    /// Monthly withholding tax.
    pub fn monthly_withholding_tax(
        &self,
        employee_id: &str,
        year_month: YearMonth,
    ) -> EngineResult<Decimal> {
        self.monthly(DeductionKind::WithholdingTax, employee_id, year_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, ContributionBracket, HousingFundBracket};
    use crate::store::InMemoryEmployeeDirectory;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june() -> YearMonth {
        YearMonth::new(2024, 6).unwrap()
    }

    fn tables() -> ContributionTables {
        ConfigLoader::load("./config/contributions.json")
            .unwrap()
            .into_tables()
    }

    fn directory() -> InMemoryEmployeeDirectory {
        let mut no_salary = Employee::new("10003", dec("0"), dec("100"));
        no_salary.basic_salary = None;

        vec![
            Employee::new("10001", dec("25000"), dec("100")),
            Employee::new("10002", dec("90000"), dec("535.71")),
            no_salary,
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_monthly_deductions_reference_salary() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        assert_eq!(engine.monthly_sss("10001", june()).unwrap(), dec("1125.00"));
        assert_eq!(engine.monthly_philhealth("10001", june()).unwrap(), dec("375.00"));
        assert_eq!(engine.monthly_pagibig("10001", june()).unwrap(), dec("100.00"));
        // 25000 - 1600 = 23400 taxable; 20% of 2567.
        assert_eq!(
            engine.monthly_withholding_tax("10001", june()).unwrap(),
            dec("513.40")
        );
    }

    #[test]
    fn test_weekly_deductions_reference_salary() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);
        let (monday, sunday) = (date(2024, 6, 3), date(2024, 6, 9));

        assert_eq!(engine.weekly_sss("10001", monday, sunday).unwrap(), dec("281.25"));
        assert_eq!(
            engine.weekly_philhealth("10001", monday, sunday).unwrap(),
            dec("93.75")
        );
        assert_eq!(engine.weekly_pagibig("10001", monday, sunday).unwrap(), dec("25.00"));
        // 5773.67 - 400.00 = 5373.67 taxable.
        assert_eq!(
            engine.weekly_withholding_tax("10001", monday, sunday).unwrap(),
            dec("112.13")
        );
    }

    #[test]
    fn test_high_salary_uses_top_brackets() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        let breakdown = engine.monthly_breakdown("10002", june()).unwrap();
        assert_eq!(breakdown.sss, dec("1125.00"));
        assert_eq!(breakdown.philhealth, dec("900.00"));
        assert_eq!(breakdown.pagibig, dec("100.00"));
        // 90000 - 2125 = 87875; 10833.33 + 30% of 21208.
        assert_eq!(breakdown.withholding_tax, dec("17195.73"));
    }

    #[test]
    fn test_breakdown_matches_individual_deductions() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);
        let (monday, sunday) = (date(2024, 6, 3), date(2024, 6, 9));

        let weekly = engine.weekly_breakdown("10002", monday, sunday).unwrap();
        for kind in DeductionKind::ALL {
            assert_eq!(
                weekly.get(kind),
                engine.weekly(kind, "10002", monday, sunday).unwrap()
            );
        }
    }

    #[test]
    fn test_weekly_rejects_non_monday_start() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        let result = engine.weekly_sss("10001", date(2024, 6, 4), date(2024, 6, 9));
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_invalid_period_checked_before_employee() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        let result = engine.weekly_pagibig("99999", date(2024, 6, 3), date(2024, 6, 8));
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_unknown_employee() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        match engine.monthly_sss("99999", june()) {
            Err(EngineError::EmployeeNotFound { employee_id }) => assert_eq!(employee_id, "99999"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_basic_salary() {
        let tables = tables();
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        let result = engine.monthly_philhealth("10003", june());
        assert!(matches!(
            result,
            Err(EngineError::MissingSalaryData { ref field, .. }) if field == "basic_salary"
        ));
    }

    #[test]
    fn test_salary_beyond_tables_fails_every_deduction() {
        let tables = ContributionTables::new(
            vec![ContributionBracket {
                salary_cap: dec("20000"),
                contribution: dec("900"),
            }],
            vec![ContributionBracket {
                salary_cap: dec("999999"),
                contribution: dec("375"),
            }],
            vec![HousingFundBracket {
                salary_cap: dec("999999"),
                contribution_rate: dec("0.02"),
            }],
        );
        let employees = directory();
        let engine = DeductionEngine::new(&tables, &employees);

        assert!(matches!(
            engine.monthly_sss("10001", june()),
            Err(EngineError::BracketNotFound { .. })
        ));
        // Tax depends on SSS, so the failure propagates.
        assert!(matches!(
            engine.monthly_withholding_tax("10001", june()),
            Err(EngineError::BracketNotFound { .. })
        ));
        assert_eq!(engine.monthly_philhealth("10001", june()).unwrap(), dec("375"));
    }

    proptest! {
        #[test]
        fn test_weekly_contributions_are_monthly_over_four(salary_cents in 0i64..10_000_000i64) {
            let tables = tables();
            let employees = InMemoryEmployeeDirectory::new();
            let engine = DeductionEngine::new(&tables, &employees);
            let salary = Decimal::new(salary_cents, 2);

            for kind in [DeductionKind::Sss, DeductionKind::Philhealth, DeductionKind::Pagibig] {
                let monthly = engine.monthly_for_salary(kind, salary).unwrap();
                let weekly = engine.weekly_for_salary(kind, salary).unwrap();
                prop_assert_eq!(weekly, weekly_contribution(monthly));
            }
        }
    }
}
