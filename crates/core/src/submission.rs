//! Attendance submission orchestrator.
//!
//! [`SubmissionService`] applies one batch for one class/day:
//!
//! 1. Validate and normalize the batch (no side effects on failure).
//! 2. Load the rolls already finalized for the class/day.
//! 3. Skip finalized rolls; write a ledger mark for every other entry.
//! 4. Lock every written absent/late roll with one atomic union. Only the
//!    rolls this call newly added are owned by this batch.
//! 5. Send one notification per owned roll. A failed send stays locked.
//!
//! A ledger failure only affects its own entry, which stays unlocked so a
//! resubmission can correct it. A lock tracker failure fails the whole
//! batch, since nothing may be notified without a confirmed lock.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::attendance::{
    AttendanceBatch, AttendanceEntry, ClassKey, Classification, MarkCategory, NewMark,
    ValidatedBatch,
};
use crate::calendar::CalendarDay;
use crate::error::CoreError;
use crate::ledger::AttendanceLedger;
use crate::locks::LockTracker;
use crate::notifier::{DispatchOutcome, Notifier};
use crate::status::ClassDayStatus;
use crate::types::{DbId, Roll};

/// An entry whose ledger write failed. It was neither notified nor locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryError {
    pub student_id: DbId,
    pub roll: Roll,
    pub error: String,
}

/// The result of one notification attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutcome {
    pub student_id: DbId,
    pub roll: Roll,
    pub category: MarkCategory,
    pub success: bool,
    pub raw: String,
}

/// Counts returned to the submitting client.
///
/// Every entry lands in exactly one of `processed`, `skipped` or `errors`.
/// `sent + failed` is the number of notifications attempted by this batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionSummary {
    pub processed: usize,
    pub skipped: usize,
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<EntryError>,
    pub outcomes: Vec<NotificationOutcome>,
}

/// Orchestrates ledger writes, locking and notification for one batch.
pub struct SubmissionService<L, K, N> {
    ledger: L,
    locks: K,
    notifier: N,
}

impl<L, K, N> SubmissionService<L, K, N>
where
    L: AttendanceLedger,
    K: LockTracker,
    N: Notifier,
{
    pub fn new(ledger: L, locks: K, notifier: N) -> Self {
        Self {
            ledger,
            locks,
            notifier,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn locks(&self) -> &K {
        &self.locks
    }

    /// Validate and apply a raw batch.
    pub async fn submit(&self, batch: AttendanceBatch) -> Result<SubmissionSummary, CoreError> {
        let batch = batch.validate()?;
        self.submit_validated(batch).await
    }

    /// Apply a batch that already passed [`AttendanceBatch::validate`].
    pub async fn submit_validated(
        &self,
        batch: ValidatedBatch,
    ) -> Result<SubmissionSummary, CoreError> {
        let ValidatedBatch {
            day,
            class,
            entries,
        } = batch;

        tracing::info!(
            class = %class,
            day = %day,
            entries = entries.len(),
            "Attendance batch accepted",
        );

        let locked = self.locks.get_locked(&class, day).await?;

        let mut summary = SubmissionSummary::default();
        let mut candidates: Vec<(&AttendanceEntry, MarkCategory)> = Vec::new();

        for entry in &entries {
            if locked.contains(&entry.roll) {
                tracing::debug!(class = %class, day = %day, roll = entry.roll, "Roll already finalized, skipping");
                summary.skipped += 1;
                continue;
            }

            let mark = NewMark::from_entry(entry, day);
            if let Err(e) = self.ledger.upsert_mark(&mark).await {
                tracing::warn!(
                    class = %class,
                    day = %day,
                    roll = entry.roll,
                    student_id = entry.student_id,
                    error = %e,
                    "Attendance mark write failed",
                );
                summary.errors.push(EntryError {
                    student_id: entry.student_id,
                    roll: entry.roll,
                    error: e.to_string(),
                });
                continue;
            }
            summary.processed += 1;

            if let Classification::Notify(category) = entry.classification() {
                candidates.push((entry, category));
            }
        }

        if !candidates.is_empty() {
            let rolls: BTreeSet<Roll> = candidates.iter().map(|(e, _)| e.roll).collect();
            let claimed = self.locks.add_locked(&class, day, &rolls).await?;
            tracing::debug!(
                class = %class,
                day = %day,
                requested = rolls.len(),
                claimed = claimed.len(),
                "Locked rolls merged",
            );

            for (entry, category) in candidates {
                if !claimed.contains(&entry.roll) {
                    // Finalized by a concurrent submission after our initial load.
                    tracing::info!(class = %class, day = %day, roll = entry.roll, "Roll finalized concurrently, not notifying");
                    summary.processed -= 1;
                    summary.skipped += 1;
                    continue;
                }

                let outcome = self.dispatch(&class, day, entry, category).await;
                if outcome.success {
                    summary.sent += 1;
                } else {
                    summary.failed += 1;
                }
                summary.outcomes.push(NotificationOutcome {
                    student_id: entry.student_id,
                    roll: entry.roll,
                    category,
                    success: outcome.success,
                    raw: outcome.raw,
                });
            }
        }

        tracing::info!(
            class = %class,
            day = %day,
            processed = summary.processed,
            skipped = summary.skipped,
            sent = summary.sent,
            failed = summary.failed,
            errors = summary.errors.len(),
            "Attendance batch applied",
        );

        Ok(summary)
    }

    async fn dispatch(
        &self,
        class: &ClassKey,
        day: CalendarDay,
        entry: &AttendanceEntry,
        category: MarkCategory,
    ) -> DispatchOutcome {
        match self
            .notifier
            .send(&entry.mobile, category, &entry.name)
            .await
        {
            Ok(outcome) => {
                if outcome.success {
                    tracing::info!(class = %class, day = %day, roll = entry.roll, category = %category, "Parent notified");
                } else {
                    tracing::warn!(
                        class = %class,
                        day = %day,
                        roll = entry.roll,
                        category = %category,
                        response = %outcome.raw,
                        "SMS provider rejected notification",
                    );
                }
                outcome
            }
            Err(e) => {
                tracing::error!(
                    class = %class,
                    day = %day,
                    roll = entry.roll,
                    category = %category,
                    error = %e,
                    "SMS dispatch failed",
                );
                DispatchOutcome::rejected(e.to_string())
            }
        }
    }

    /// Absent/late rolls from the ledger plus the locked set for a class/day.
    pub async fn status(
        &self,
        class: &ClassKey,
        day: CalendarDay,
    ) -> Result<ClassDayStatus, CoreError> {
        let marks = self.ledger.find_marks(class, day).await?;
        let locked = self.locks.get_locked(class, day).await?;
        Ok(ClassDayStatus::new(&marks, locked))
    }

    /// The locked rolls for a class/day.
    pub async fn locked(
        &self,
        class: &ClassKey,
        day: CalendarDay,
    ) -> Result<BTreeSet<Roll>, CoreError> {
        Ok(self.locks.get_locked(class, day).await?)
    }
}
