//! Attendance ledger contract.
//!
//! The ledger is the source of truth for "was this student marked on this
//! day, and what was recorded". Implementations must enforce at most one
//! mark per `(student, day)`.

use std::future::Future;

use crate::attendance::{AttendanceMark, ClassCount, ClassKey, NewMark};
use crate::calendar::{CalendarDay, DayRange};
use crate::error::StorageError;
use crate::types::DbId;

pub trait AttendanceLedger: Send + Sync {
    /// Insert or overwrite the mark keyed by `(student_id, day)`.
    ///
    /// Returns the id of the written row. Last write wins for the same key.
    fn upsert_mark(
        &self,
        mark: &NewMark,
    ) -> impl Future<Output = Result<DbId, StorageError>> + Send;

    /// All marks for one class/division on one day, ordered by roll.
    fn find_marks(
        &self,
        class: &ClassKey,
        day: CalendarDay,
    ) -> impl Future<Output = Result<Vec<AttendanceMark>, StorageError>> + Send;

    /// Number of absent marks for a class/division over an inclusive range.
    fn count_absent(
        &self,
        class: &ClassKey,
        range: DayRange,
    ) -> impl Future<Output = Result<i64, StorageError>> + Send;

    /// Mark totals grouped by class/division for one day.
    fn count_by_class(
        &self,
        day: CalendarDay,
    ) -> impl Future<Output = Result<Vec<ClassCount>, StorageError>> + Send;
}
