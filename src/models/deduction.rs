//! Statutory deduction models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four statutory deductions taken from an employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Social Security System contribution.
    Sss,
    /// PhilHealth health insurance premium.
    Philhealth,
    /// Pag-IBIG housing fund contribution.
    Pagibig,
    /// Withholding tax on compensation.
    WithholdingTax,
}

impl DeductionKind {
    /// All deductions in the order they are computed and reported.
    pub const ALL: [DeductionKind; 4] = [
        DeductionKind::Sss,
        DeductionKind::Philhealth,
        DeductionKind::Pagibig,
        DeductionKind::WithholdingTax,
    ];

    /// Display label used in messages and audit steps.
    pub fn label(&self) -> &'static str {
        match self {
            DeductionKind::Sss => "SSS",
            DeductionKind::Philhealth => "PhilHealth",
            DeductionKind::Pagibig => "Pag-IBIG",
            DeductionKind::WithholdingTax => "Withholding Tax",
        }
    }

    /// Path segment used by the HTTP adapter.
    pub fn slug(&self) -> &'static str {
        match self {
            DeductionKind::Sss => "sss",
            DeductionKind::Philhealth => "philhealth",
            DeductionKind::Pagibig => "pagibig",
            DeductionKind::WithholdingTax => "withholding-tax",
        }
    }
}

impl fmt::Display for DeductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeductionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeductionKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown deduction: {}", s))
    }
}

/// Itemized deductions for one employee and period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = DeductionBreakdown {
///     sss: Decimal::new(112500, 2),
///     philhealth: Decimal::new(37500, 2),
///     pagibig: Decimal::new(10000, 2),
///     withholding_tax: Decimal::new(34625, 2),
/// };
/// assert_eq!(breakdown.total(), Decimal::new(194625, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Social insurance.
    pub sss: Decimal,
    /// Health insurance.
    pub philhealth: Decimal,
    /// Housing fund.
    pub pagibig: Decimal,
    /// Withholding tax.
    pub withholding_tax: Decimal,
}

impl DeductionBreakdown {
    /// Sum of all four deductions.
    pub fn total(&self) -> Decimal {
        self.sss + self.philhealth + self.pagibig + self.withholding_tax
    }

    /// The amount recorded for one deduction.
    pub fn get(&self, kind: DeductionKind) -> Decimal {
        match kind {
            DeductionKind::Sss => self.sss,
            DeductionKind::Philhealth => self.philhealth,
            DeductionKind::Pagibig => self.pagibig,
            DeductionKind::WithholdingTax => self.withholding_tax,
        }
    }
}
