//! Repository for the `attendance_locks` table (the idempotency tracker).
//!
//! A class/day's locked set is the set of its rows. Rows are never deleted.

use std::collections::BTreeSet;

use rollcall_core::attendance::ClassKey;
use rollcall_core::calendar::CalendarDay;
use rollcall_core::types::Roll;
use sqlx::PgPool;

/// Provides read and add-only merge of locked rolls.
pub struct AttendanceLockRepo;

impl AttendanceLockRepo {
    /// The locked rolls for a class/day. Empty if none were locked yet.
    pub async fn find_locked(
        pool: &PgPool,
        class: &ClassKey,
        day: CalendarDay,
    ) -> Result<BTreeSet<Roll>, sqlx::Error> {
        let rolls = sqlx::query_scalar::<_, Roll>(
            "SELECT roll FROM attendance_locks \
             WHERE std = $1 AND div = $2 AND attendance_date = $3",
        )
        .bind(&class.std)
        .bind(&class.div)
        .bind(day.date())
        .fetch_all(pool)
        .await?;
        Ok(rolls.into_iter().collect())
    }

    /// Merge `rolls` into the locked set in a single statement.
    ///
    /// Rolls that are already locked hit `uq_attendance_locks_class_day_roll`
    /// and are skipped by `ON CONFLICT DO NOTHING`; `RETURNING` therefore
    /// yields exactly the rolls newly locked by this call. Two concurrent
    /// callers can never both receive the same roll.
    pub async fn add_locked(
        pool: &PgPool,
        class: &ClassKey,
        day: CalendarDay,
        rolls: &BTreeSet<Roll>,
    ) -> Result<BTreeSet<Roll>, sqlx::Error> {
        if rolls.is_empty() {
            return Ok(BTreeSet::new());
        }
        let requested: Vec<Roll> = rolls.iter().copied().collect();
        let added = sqlx::query_scalar::<_, Roll>(
            "INSERT INTO attendance_locks (std, div, attendance_date, roll) \
             SELECT $1, $2, $3, r FROM UNNEST($4::INTEGER[]) AS r \
             ON CONFLICT ON CONSTRAINT uq_attendance_locks_class_day_roll DO NOTHING \
             RETURNING roll",
        )
        .bind(&class.std)
        .bind(&class.div)
        .bind(day.date())
        .bind(requested)
        .fetch_all(pool)
        .await?;
        Ok(added.into_iter().collect())
    }
}
