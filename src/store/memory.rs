//! In-memory store implementations.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee};

use super::{AttendanceStore, EmployeeDirectory};

/// Attendance kept in a `BTreeMap` keyed by `(employee_id, date)`.
///
/// The composite key makes per-employee range scans a single ordered walk,
/// and enforces one record per employee per day.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    records: RwLock<BTreeMap<(String, NaiveDate), AttendanceRecord>>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AttendanceStore for InMemoryAttendanceStore {
    fn insert(&self, record: AttendanceRecord) -> EngineResult<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let key = (record.employee_id.clone(), record.date);

        if records.contains_key(&key) {
            return Err(EngineError::DuplicateAttendance {
                employee_id: key.0,
                date: key.1,
            });
        }

        debug!(employee_id = %key.0, date = %key.1, "Stored attendance record");
        records.insert(key, record);
        Ok(())
    }

    fn find_by_employee_and_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        if start > end {
            return Vec::new();
        }
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .range((employee_id.to_string(), start)..=(employee_id.to_string(), end))
            .map(|(_, record)| record.clone())
            .collect()
    }

    fn find_all_by_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<AttendanceRecord> = records
            .values()
            .filter(|record| record.date >= start && record.date <= end)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.employee_id.cmp(&b.employee_id)));
        found
    }

    fn min_date(&self) -> Option<NaiveDate> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.keys().map(|(_, date)| *date).min()
    }

    fn max_date(&self) -> Option<NaiveDate> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.keys().map(|(_, date)| *date).max()
    }
}

/// Employees held in a `HashMap` keyed by employee id.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<String, Employee>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert(&self, employee: Employee) {
        self.employees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(employee.employee_id.clone(), employee);
    }
}

impl FromIterator<Employee> for InMemoryEmployeeDirectory {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        let employees = iter
            .into_iter()
            .map(|employee| (employee.employee_id.clone(), employee))
            .collect();
        Self {
            employees: RwLock::new(employees),
        }
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn find_by_employee_id(&self, employee_id: &str) -> Option<Employee> {
        self.employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(employee_id)
            .cloned()
    }
}
