//! PostgreSQL implementations of the core ledger and lock-tracker traits.
//!
//! Thin adapters over [`AttendanceMarkRepo`] and [`AttendanceLockRepo`] that
//! convert rows into domain types and `sqlx` errors into [`StorageError`].

use std::collections::BTreeSet;

use rollcall_core::attendance::{AttendanceMark, ClassCount, ClassKey, NewMark};
use rollcall_core::calendar::{CalendarDay, DayRange};
use rollcall_core::error::StorageError;
use rollcall_core::ledger::AttendanceLedger;
use rollcall_core::locks::LockTracker;
use rollcall_core::types::{DbId, Roll};

use crate::repositories::{AttendanceLockRepo, AttendanceMarkRepo};
use crate::DbPool;

/// [`AttendanceLedger`] backed by the `attendance_marks` table.
#[derive(Clone)]
pub struct PgAttendanceLedger {
    pool: DbPool,
}

impl PgAttendanceLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AttendanceLedger for PgAttendanceLedger {
    async fn upsert_mark(&self, mark: &NewMark) -> Result<DbId, StorageError> {
        AttendanceMarkRepo::upsert(&self.pool, mark)
            .await
            .map_err(|e| StorageError::new("upsert attendance mark", e))
    }

    async fn find_marks(
        &self,
        class: &ClassKey,
        day: CalendarDay,
    ) -> Result<Vec<AttendanceMark>, StorageError> {
        let rows = AttendanceMarkRepo::find_for_class_day(&self.pool, class, day)
            .await
            .map_err(|e| StorageError::new("load attendance marks", e))?;
        Ok(rows.into_iter().map(AttendanceMark::from).collect())
    }

    async fn count_absent(&self, class: &ClassKey, range: DayRange) -> Result<i64, StorageError> {
        AttendanceMarkRepo::count_absent(&self.pool, class, range)
            .await
            .map_err(|e| StorageError::new("count absent marks", e))
    }

    async fn count_by_class(&self, day: CalendarDay) -> Result<Vec<ClassCount>, StorageError> {
        let rows = AttendanceMarkRepo::count_by_class(&self.pool, day)
            .await
            .map_err(|e| StorageError::new("count marks by class", e))?;
        Ok(rows.into_iter().map(ClassCount::from).collect())
    }
}

/// [`LockTracker`] backed by the `attendance_locks` table.
#[derive(Clone)]
pub struct PgLockTracker {
    pool: DbPool,
}

impl PgLockTracker {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl LockTracker for PgLockTracker {
    async fn get_locked(
        &self,
        class: &ClassKey,
        day: CalendarDay,
    ) -> Result<BTreeSet<Roll>, StorageError> {
        AttendanceLockRepo::find_locked(&self.pool, class, day)
            .await
            .map_err(|e| StorageError::new("load locked rolls", e))
    }

    async fn add_locked(
        &self,
        class: &ClassKey,
        day: CalendarDay,
        rolls: &BTreeSet<Roll>,
    ) -> Result<BTreeSet<Roll>, StorageError> {
        AttendanceLockRepo::add_locked(&self.pool, class, day, rolls)
            .await
            .map_err(|e| StorageError::new("merge locked rolls", e))
    }
}
