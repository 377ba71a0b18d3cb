//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! contribution tables from JSON or YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{ContributionTables, ContributionsConfig};

/// The file formats a contribution table can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `serde_json` document (the default).
    Json,
    /// `serde_yaml` document, selected by a `.yaml` or `.yml` extension.
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Loads and validates the contribution tables.
///
/// The file maps each deduction name to its ordered brackets:
///
/// ```text
/// {
///   "sss":        [{ "salaryCap": 3249.99, "contribution": 135.00 }, ...],
///   "philhealth": [{ "salaryCap": 10000.00, "contribution": 150.00 }, ...],
///   "pagibig":    [{ "salaryCap": 1500.00, "contributionRate": 0.01 }, ...]
/// }
/// ```
///
/// A missing file, a parse failure, an empty table, a negative amount or
/// caps out of ascending order all fail the load. The service cannot
/// compute deductions without the tables, so callers treat any error here
/// as fatal at startup.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/contributions.json")?;
/// println!("{} SSS brackets", loader.tables().sss().len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: ContributionTables,
}

impl ConfigLoader {
    /// Loads contribution tables from the specified file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader =
            Self::from_str_with_format(&content, ConfigFormat::from_path(path), &path_str)?;
        info!(
            path = %path_str,
            sss_brackets = loader.tables.sss().len(),
            philhealth_brackets = loader.tables.philhealth().len(),
            pagibig_brackets = loader.tables.pagibig().len(),
            "Loaded contribution tables"
        );
        Ok(loader)
    }

    /// Parses contribution tables from an in-memory document.
    ///
    /// `source` names the document in error messages.
    pub fn from_str_with_format(
        content: &str,
        format: ConfigFormat,
        source: &str,
    ) -> EngineResult<Self> {
        let parse_error = |message: String| EngineError::ConfigParseError {
            path: source.to_string(),
            message,
        };

        let config: ContributionsConfig = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        Self::validate_table("sss", config.sss.iter().map(|b| (b.salary_cap, b.contribution)))
            .map_err(parse_error)?;
        Self::validate_table(
            "philhealth",
            config.philhealth.iter().map(|b| (b.salary_cap, b.contribution)),
        )
        .map_err(parse_error)?;
        Self::validate_table(
            "pagibig",
            config.pagibig.iter().map(|b| (b.salary_cap, b.contribution_rate)),
        )
        .map_err(parse_error)?;

        Ok(Self {
            tables: config.into(),
        })
    }

    /// Checks one table is non-empty, non-negative and ordered by cap.
    fn validate_table(
        name: &str,
        brackets: impl Iterator<Item = (Decimal, Decimal)>,
    ) -> Result<(), String> {
        let mut previous_cap: Option<Decimal> = None;
        let mut count = 0;

        for (index, (cap, amount)) in brackets.enumerate() {
            if cap.is_sign_negative() || amount.is_sign_negative() {
                return Err(format!("{} bracket {} has a negative value", name, index));
            }
            if let Some(previous) = previous_cap {
                if cap < previous {
                    return Err(format!(
                        "{} bracket {} cap {} is below the previous cap {}",
                        name, index, cap, previous
                    ));
                }
            }
            previous_cap = Some(cap);
            count += 1;
        }

        if count == 0 {
            return Err(format!("{} table has no brackets", name));
        }
        Ok(())
    }

    /// Returns the loaded tables.
    pub fn tables(&self) -> &ContributionTables {
        &self.tables
    }

    /// Consumes the loader, returning the tables.
    pub fn into_tables(self) -> ContributionTables {
        self.tables
    }
}
