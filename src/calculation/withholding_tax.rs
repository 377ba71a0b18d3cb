//! Withholding tax on compensation.
//!
//! ## Rate Structure
//!
//! Tax is a fixed amount plus a marginal rate on the excess over the band's
//! lower bound. Each band covers taxable income up to and including its
//! ceiling.
//!
//! | Monthly ceiling | Fixed      | Weekly ceiling | Fixed  | Rate |
//! |-----------------|------------|----------------|--------|------|
//! | 20,833          | 0          | 4,813          | 0      | 0%   |
//! | 33,333          | 0          | 7,692          | 0      | 20%  |
//! | 66,667          | 2,500      | 15,385         | 577    | 25%  |
//! | 166,667         | 10,833.33  | 38,462         | 2,502  | 30%  |
//! | 666,667         | 40,833.33  | 153,846        | 9,423  | 32%  |
//! | above           | 200,833.33 | above          | 46,385 | 35%  |
//!
//! The weekly salary used as the weekly tax base is the monthly salary over
//! 4.33, while weekly contributions split the month over exactly four weeks.
//!
//! Weekly tax is rounded to two decimals half-up at the band, the same as
//! monthly tax, so a weekly product of 112.134 is reported as 112.13 rather
//! than carried at full precision.

use rust_decimal::Decimal;

use super::rounding::round_half_up;

/// Divisor turning a monthly salary into the weekly tax base.
pub const TAX_WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// One row of a graduated tax table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBand {
    /// Highest taxable income in the band; `None` for the open top band.
    pub ceiling: Option<Decimal>,
    /// Income above which the marginal rate applies.
    pub lower_bound: Decimal,
    /// Tax owed on income up to `lower_bound`.
    pub fixed_tax: Decimal,
    /// Marginal rate on the excess over `lower_bound`.
    pub rate: Decimal,
}

const fn whole(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

const fn cents(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 2)
}

const fn band(
    ceiling: Option<Decimal>,
    lower_bound: Decimal,
    fixed_tax: Decimal,
    rate: Decimal,
) -> TaxBand {
    TaxBand {
        ceiling,
        lower_bound,
        fixed_tax,
        rate,
    }
}

/// Weekly withholding tax table.
pub const WEEKLY_TAX_BANDS: [TaxBand; 6] = [
    band(Some(whole(4_813)), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    band(Some(whole(7_692)), whole(4_813), Decimal::ZERO, cents(20)),
    band(Some(whole(15_385)), whole(7_692), whole(577), cents(25)),
    band(Some(whole(38_462)), whole(15_385), whole(2_502), cents(30)),
    band(Some(whole(153_846)), whole(38_462), whole(9_423), cents(32)),
    band(None, whole(153_846), whole(46_385), cents(35)),
];

/// Monthly withholding tax table.
pub const MONTHLY_TAX_BANDS: [TaxBand; 6] = [
    band(Some(whole(20_833)), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    band(Some(whole(33_333)), whole(20_833), Decimal::ZERO, cents(20)),
    band(Some(whole(66_667)), whole(33_333), whole(2_500), cents(25)),
    band(Some(whole(166_667)), whole(66_667), cents(1_083_333), cents(30)),
    band(Some(whole(666_667)), whole(166_667), cents(4_083_333), cents(32)),
    band(None, whole(666_667), cents(20_083_333), cents(35)),
];

/// Tax owed on `taxable` under `bands`, two decimals half-up.
///
/// Taxable income at or below the first ceiling, including negative
/// income, owes nothing.
pub fn tax_for_bands(bands: &[TaxBand], taxable: Decimal) -> Decimal {
    let tax = bands
        .iter()
        .find(|band| band.ceiling.is_none_or(|ceiling| taxable <= ceiling))
        .map_or(Decimal::ZERO, |band| {
            band.fixed_tax + band.rate * (taxable - band.lower_bound)
        });

    round_half_up(tax)
}

/// Weekly withholding tax on weekly taxable income.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::weekly_withholding_tax;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = weekly_withholding_tax(Decimal::from_str("5373.67").unwrap());
/// assert_eq!(tax.to_string(), "112.13");
/// ```
pub fn weekly_withholding_tax(taxable: Decimal) -> Decimal {
    tax_for_bands(&WEEKLY_TAX_BANDS, taxable)
}

/// Monthly withholding tax on monthly taxable income.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::monthly_withholding_tax;
/// use rust_decimal::Decimal;
///
/// assert!(monthly_withholding_tax(Decimal::new(20833, 0)).is_zero());
/// assert_eq!(monthly_withholding_tax(Decimal::new(23400, 0)).to_string(), "513.40");
/// ```
pub fn monthly_withholding_tax(taxable: Decimal) -> Decimal {
    tax_for_bands(&MONTHLY_TAX_BANDS, taxable)
}

/// Weekly salary used as the weekly tax base.
pub fn weekly_tax_base(monthly_salary: Decimal) -> Decimal {
    round_half_up(monthly_salary / TAX_WEEKS_PER_MONTH)
}
