//! Statutory contribution configuration.
//!
//! This module loads the SSS, PhilHealth and Pag-IBIG bracket tables from a
//! JSON or YAML file. The tables are loaded once at startup and shared
//! read-only by every deduction computation.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let tables = ConfigLoader::load("./config/contributions.json").unwrap().into_tables();
//! println!("First SSS cap: {}", tables.sss()[0].salary_cap);
//! ```

mod loader;
mod types;

pub use loader::{ConfigFormat, ConfigLoader};
pub use types::{ContributionBracket, ContributionTables, ContributionsConfig, HousingFundBracket};
