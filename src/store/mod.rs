//! Record store collaborators.
//!
//! The payroll core only needs to insert attendance and run range queries
//! against it, plus look employees up by their external identifier. These
//! traits describe exactly that surface; the bundled in-memory
//! implementations back the binary, the tests and the benchmarks.

mod memory;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee};

pub use memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};

/// Storage for daily attendance punches.
///
/// Implementations own their own synchronization; every method takes
/// `&self` so a store can be shared behind an `Arc`.
pub trait AttendanceStore: Send + Sync {
    /// Stores a new record.
    ///
    /// Fails with `DuplicateAttendance` when a record already exists for the
    /// same employee and date.
    fn insert(&self, record: AttendanceRecord) -> EngineResult<()>;

    /// Records for one employee with `start <= date <= end`, ordered by date.
    fn find_by_employee_and_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord>;

    /// Records for every employee with `start <= date <= end`.
    fn find_all_by_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord>;

    /// Earliest stored attendance date, if any.
    fn min_date(&self) -> Option<NaiveDate>;

    /// Latest stored attendance date, if any.
    fn max_date(&self) -> Option<NaiveDate>;
}

/// Read access to employee master data.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks an employee up by external identifier.
    fn find_by_employee_id(&self, employee_id: &str) -> Option<Employee>;
}
