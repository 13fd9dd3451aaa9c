//! Repository for the `attendance_marks` table (the attendance ledger).
//!
//! All day comparisons use the `DATE` column written from a
//! [`CalendarDay`], so reads and writes agree on the day boundary.

use rollcall_core::attendance::{ClassKey, NewMark};
use rollcall_core::calendar::{CalendarDay, DayRange};
use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{AttendanceMarkRow, ClassCountRow};

/// Column list for `attendance_marks` queries.
const COLUMNS: &str = "\
    id, student_id, std, div, roll, attendance_date, present, late, \
    created_at, updated_at";

/// Provides ledger writes and class/day reads.
pub struct AttendanceMarkRepo;

impl AttendanceMarkRepo {
    /// Insert or overwrite the mark for `(student_id, day)`.
    ///
    /// Uses `ON CONFLICT` on `uq_attendance_marks_student_date`, so there is
    /// never more than one row per student per day. Returns the row id.
    pub async fn upsert(pool: &PgPool, mark: &NewMark) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO attendance_marks \
                 (student_id, std, div, roll, attendance_date, present, late) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT ON CONSTRAINT uq_attendance_marks_student_date DO UPDATE SET \
                 std = EXCLUDED.std, \
                 div = EXCLUDED.div, \
                 roll = EXCLUDED.roll, \
                 present = EXCLUDED.present, \
                 late = EXCLUDED.late, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(mark.student_id)
        .bind(&mark.class.std)
        .bind(&mark.class.div)
        .bind(mark.roll)
        .bind(mark.day.date())
        .bind(mark.present)
        .bind(mark.present && mark.late)
        .fetch_one(pool)
        .await
    }

    /// All marks for a class/division on one day, ordered by roll.
    pub async fn find_for_class_day(
        pool: &PgPool,
        class: &ClassKey,
        day: CalendarDay,
    ) -> Result<Vec<AttendanceMarkRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_marks \
             WHERE std = $1 AND div = $2 AND attendance_date = $3 \
             ORDER BY roll"
        );
        sqlx::query_as::<_, AttendanceMarkRow>(&query)
            .bind(&class.std)
            .bind(&class.div)
            .bind(day.date())
            .fetch_all(pool)
            .await
    }

    /// Count absent marks for a class/division over an inclusive day range.
    pub async fn count_absent(
        pool: &PgPool,
        class: &ClassKey,
        range: DayRange,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance_marks \
             WHERE std = $1 AND div = $2 \
               AND attendance_date BETWEEN $3 AND $4 \
               AND NOT present",
        )
        .bind(&class.std)
        .bind(&class.div)
        .bind(range.from.date())
        .bind(range.to.date())
        .fetch_one(pool)
        .await
    }

    /// Mark totals per class/division for one day.
    pub async fn count_by_class(
        pool: &PgPool,
        day: CalendarDay,
    ) -> Result<Vec<ClassCountRow>, sqlx::Error> {
        sqlx::query_as::<_, ClassCountRow>(
            "SELECT std, div, \
                    COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE NOT present) AS absent, \
                    COUNT(*) FILTER (WHERE present AND late) AS late \
             FROM attendance_marks \
             WHERE attendance_date = $1 \
             GROUP BY std, div \
             ORDER BY std, div",
        )
        .bind(day.date())
        .fetch_all(pool)
        .await
    }
}
