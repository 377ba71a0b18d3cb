//! Configuration types for statutory contribution tables.
//!
//! This module contains the strongly-typed structures that contribution
//! configuration files deserialize into.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A flat-amount bracket: salaries up to `salary_cap` contribute `contribution`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBracket {
    /// Highest monthly salary (inclusive) this bracket covers.
    pub salary_cap: Decimal,
    /// Monthly contribution for salaries in this bracket.
    pub contribution: Decimal,
}

/// A rate-based bracket used by the housing fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingFundBracket {
    /// Highest monthly salary (inclusive) this bracket covers.
    pub salary_cap: Decimal,
    /// Fraction of salary contributed (e.g., 0.02).
    pub contribution_rate: Decimal,
}

/// Contribution file structure: deduction name to its ordered brackets.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Social Security System brackets.
    pub sss: Vec<ContributionBracket>,
    /// PhilHealth brackets.
    pub philhealth: Vec<ContributionBracket>,
    /// Pag-IBIG brackets.
    pub pagibig: Vec<HousingFundBracket>,
}

/// The three bracket tables, loaded once and shared read-only.
///
/// Brackets keep the order they were configured in; lookups take the first
/// bracket whose cap covers the salary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionTables {
    sss: Vec<ContributionBracket>,
    philhealth: Vec<ContributionBracket>,
    pagibig: Vec<HousingFundBracket>,
}

impl ContributionTables {
    /// Creates the tables from their component parts.
    pub fn new(
        sss: Vec<ContributionBracket>,
        philhealth: Vec<ContributionBracket>,
        pagibig: Vec<HousingFundBracket>,
    ) -> Self {
        Self {
            sss,
            philhealth,
            pagibig,
        }
    }

    /// Returns the SSS brackets.
    pub fn sss(&self) -> &[ContributionBracket] {
        &self.sss
    }

    /// Returns the PhilHealth brackets.
    pub fn philhealth(&self) -> &[ContributionBracket] {
        &self.philhealth
    }

    /// Returns the Pag-IBIG brackets.
    pub fn pagibig(&self) -> &[HousingFundBracket] {
        &self.pagibig
    }
}

impl From<ContributionsConfig> for ContributionTables {
    fn from(config: ContributionsConfig) -> Self {
        Self::new(config.sss, config.philhealth, config.pagibig)
    }
}
