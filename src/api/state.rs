//! Application state for the payroll HTTP API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::SalaryEngine;
use crate::config::ContributionTables;
use crate::store::{AttendanceStore, EmployeeDirectory};

/// Shared application state.
///
/// Holds the contribution tables loaded at startup and the two record
/// stores. Cloning is cheap; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    tables: Arc<ContributionTables>,
    attendance: Arc<dyn AttendanceStore>,
    employees: Arc<dyn EmployeeDirectory>,
}

impl AppState {
    /// Creates a new application state over the given tables and stores.
    pub fn new(
        tables: ContributionTables,
        attendance: Arc<dyn AttendanceStore>,
        employees: Arc<dyn EmployeeDirectory>,
    ) -> Self {
        Self {
            tables: Arc::new(tables),
            attendance,
            employees,
        }
    }

    /// Returns the contribution tables.
    pub fn tables(&self) -> &ContributionTables {
        &self.tables
    }

    /// Returns the attendance store.
    pub fn attendance(&self) -> &dyn AttendanceStore {
        self.attendance.as_ref()
    }

    /// Returns the employee directory.
    pub fn employees(&self) -> &dyn EmployeeDirectory {
        self.employees.as_ref()
    }

    /// A salary engine borrowing this state.
    pub fn salary_engine(&self) -> SalaryEngine<'_> {
        SalaryEngine::new(&self.tables, self.attendance(), self.employees())
    }
}
