//! Monetary and hour rounding.
//!
//! Every figure the engine reports is held to two decimal places, rounding
//! midpoints away from zero (half-up).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minutes in an hour.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Rounds to two decimal places, half-up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("1.005").unwrap()).to_string(), "1.01");
/// assert_eq!(round_half_up(Decimal::from_str("-1.005").unwrap()).to_string(), "-1.01");
/// assert_eq!(round_half_up(Decimal::from(45)).to_string(), "45.00");
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never widens the scale; pad so "45" reports as "45.00".
    rounded.rescale(2);
    rounded
}

/// Converts whole minutes to hours, two decimals half-up.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    round_half_up(Decimal::from(minutes) / MINUTES_PER_HOUR)
}
