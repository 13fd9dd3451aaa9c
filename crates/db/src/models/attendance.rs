//! Attendance ledger rows.
//!
//! The domain shapes live in `rollcall_core::attendance`; these structs only
//! exist to decode rows and are converted immediately.

use chrono::NaiveDate;
use rollcall_core::attendance::{AttendanceMark, ClassCount};
use rollcall_core::calendar::CalendarDay;
use rollcall_core::types::{DbId, Roll, Timestamp};
use sqlx::FromRow;

/// A row from the `attendance_marks` table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceMarkRow {
    pub id: DbId,
    pub student_id: DbId,
    pub std: String,
    pub div: String,
    pub roll: Roll,
    pub attendance_date: NaiveDate,
    pub present: bool,
    pub late: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AttendanceMarkRow> for AttendanceMark {
    fn from(row: AttendanceMarkRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            std: row.std,
            div: row.div,
            roll: row.roll,
            date: CalendarDay::new(row.attendance_date),
            present: row.present,
            late: row.late,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One group of the per-class aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct ClassCountRow {
    pub std: String,
    pub div: String,
    pub total: i64,
    pub absent: i64,
    pub late: i64,
}

impl From<ClassCountRow> for ClassCount {
    fn from(row: ClassCountRow) -> Self {
        Self {
            std: row.std,
            div: row.div,
            total: row.total,
            absent: row.absent,
            late: row.late,
        }
    }
}
