//! Bracket lookups for the three statutory contributions.
//!
//! SSS and PhilHealth are flat amounts read from the first bracket whose cap
//! covers the salary. Pag-IBIG applies the bracket's rate to the salary and
//! caps the result. Weekly contributions are the monthly figure split over
//! four weeks.

use rust_decimal::Decimal;

use crate::config::{ContributionBracket, HousingFundBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::DeductionKind;

use super::rounding::round_half_up;

/// Ceiling on the monthly Pag-IBIG contribution.
pub const PAGIBIG_MAX_CONTRIBUTION: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Divisor turning a monthly contribution into a weekly one.
pub const CONTRIBUTION_WEEKS_PER_MONTH: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

fn bracket_not_found(kind: DeductionKind, salary: Decimal) -> EngineError {
    EngineError::BracketNotFound {
        deduction: kind.label().to_string(),
        salary,
    }
}

/// Monthly flat contribution for `salary` from an ordered bracket table.
///
/// Fails with `BracketNotFound` when the salary is negative or exceeds
/// every cap.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::monthly_flat_contribution;
/// use payroll_engine::config::ContributionBracket;
/// use payroll_engine::models::DeductionKind;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     ContributionBracket { salary_cap: Decimal::new(10000, 0), contribution: Decimal::new(150, 0) },
///     ContributionBracket { salary_cap: Decimal::new(15000, 0), contribution: Decimal::new(225, 0) },
/// ];
/// let amount = monthly_flat_contribution(DeductionKind::Philhealth, &brackets, Decimal::new(10000, 0));
/// assert_eq!(amount.unwrap().to_string(), "150.00");
/// ```
pub fn monthly_flat_contribution(
    kind: DeductionKind,
    brackets: &[ContributionBracket],
    salary: Decimal,
) -> EngineResult<Decimal> {
    if salary.is_sign_negative() {
        return Err(bracket_not_found(kind, salary));
    }

    brackets
        .iter()
        .find(|bracket| bracket.salary_cap >= salary)
        .map(|bracket| round_half_up(bracket.contribution))
        .ok_or_else(|| bracket_not_found(kind, salary))
}

/// Monthly Pag-IBIG contribution: bracket rate times salary, capped at
/// [`PAGIBIG_MAX_CONTRIBUTION`].
pub fn monthly_housing_fund(
    brackets: &[HousingFundBracket],
    salary: Decimal,
) -> EngineResult<Decimal> {
    if salary.is_sign_negative() {
        return Err(bracket_not_found(DeductionKind::Pagibig, salary));
    }

    let bracket = brackets
        .iter()
        .find(|bracket| bracket.salary_cap >= salary)
        .ok_or_else(|| bracket_not_found(DeductionKind::Pagibig, salary))?;

    let contribution = (bracket.contribution_rate * salary).min(PAGIBIG_MAX_CONTRIBUTION);
    Ok(round_half_up(contribution))
}

/// Weekly share of a monthly contribution.
pub fn weekly_contribution(monthly: Decimal) -> Decimal {
    round_half_up(monthly / CONTRIBUTION_WEEKS_PER_MONTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn flat(pairs: &[(&str, &str)]) -> Vec<ContributionBracket> {
        pairs
            .iter()
            .map(|(cap, amount)| ContributionBracket {
                salary_cap: dec(cap),
                contribution: dec(amount),
            })
            .collect()
    }

    fn housing() -> Vec<HousingFundBracket> {
        vec![
            HousingFundBracket {
                salary_cap: dec("1500"),
                contribution_rate: dec("0.01"),
            },
            HousingFundBracket {
                salary_cap: dec("999999999.99"),
                contribution_rate: dec("0.02"),
            },
        ]
    }

    #[test]
    fn test_first_covering_bracket_applies() {
        let brackets = flat(&[("3249.99", "135.00"), ("3749.99", "157.50"), ("4249.99", "180.00")]);

        assert_eq!(
            monthly_flat_contribution(DeductionKind::Sss, &brackets, dec("3249.99")).unwrap(),
            dec("135.00")
        );
        assert_eq!(
            monthly_flat_contribution(DeductionKind::Sss, &brackets, dec("3250.00")).unwrap(),
            dec("157.50")
        );
        assert_eq!(
            monthly_flat_contribution(DeductionKind::Sss, &brackets, dec("0")).unwrap(),
            dec("135.00")
        );
    }

    #[test]
    fn test_salary_above_every_cap() {
        let brackets = flat(&[("3249.99", "135.00")]);

        match monthly_flat_contribution(DeductionKind::Sss, &brackets, dec("5000")) {
            Err(EngineError::BracketNotFound { deduction, salary }) => {
                assert_eq!(deduction, "SSS");
                assert_eq!(salary, dec("5000"));
            }
            other => panic!("Expected BracketNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_salary_has_no_bracket() {
        let brackets = flat(&[("3249.99", "135.00")]);
        assert!(matches!(
            monthly_flat_contribution(DeductionKind::Philhealth, &brackets, dec("-1")),
            Err(EngineError::BracketNotFound { .. })
        ));
        assert!(matches!(
            monthly_housing_fund(&housing(), dec("-1")),
            Err(EngineError::BracketNotFound { .. })
        ));
    }

    #[test]
    fn test_housing_fund_rate_and_cap() {
        assert_eq!(monthly_housing_fund(&housing(), dec("1000")).unwrap(), dec("10.00"));
        assert_eq!(monthly_housing_fund(&housing(), dec("4000")).unwrap(), dec("80.00"));
        assert_eq!(monthly_housing_fund(&housing(), dec("5000")).unwrap(), dec("100.00"));
        assert_eq!(monthly_housing_fund(&housing(), dec("25000")).unwrap(), dec("100.00"));
    }

    #[test]
    fn test_housing_fund_rounds_half_up() {
        // 0.01 * 1234.50 = 12.345
        assert_eq!(monthly_housing_fund(&housing(), dec("1234.50")).unwrap(), dec("12.35"));
    }

    #[test]
    fn test_weekly_contribution_is_monthly_over_four() {
        assert_eq!(weekly_contribution(dec("1125.00")), dec("281.25"));
        assert_eq!(weekly_contribution(dec("100.00")), dec("25.00"));
        // 157.50 / 4 = 39.375
        assert_eq!(weekly_contribution(dec("157.50")), dec("39.38"));
    }

    #[test]
    fn test_shipped_tables_for_reference_salary() {
        let loader = ConfigLoader::load("./config/contributions.json").unwrap();
        let tables = loader.tables();
        let salary = dec("25000");

        assert_eq!(
            monthly_flat_contribution(DeductionKind::Sss, tables.sss(), salary).unwrap(),
            dec("1125.00")
        );
        assert_eq!(
            monthly_flat_contribution(DeductionKind::Philhealth, tables.philhealth(), salary)
                .unwrap(),
            dec("375.00")
        );
        assert_eq!(monthly_housing_fund(tables.pagibig(), salary).unwrap(), dec("100.00"));
    }

    #[test]
    fn test_flat_contribution_keeps_two_decimal_places() {
        let brackets = vec![ContributionBracket {
            salary_cap: dec("30000"),
            contribution: dec("1125"),
        }];

        let amount =
            monthly_flat_contribution(DeductionKind::Sss, &brackets, dec("25000")).unwrap();
        assert_eq!(amount.to_string(), "1125.00");
    }
}
