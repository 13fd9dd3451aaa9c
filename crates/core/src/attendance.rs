//! Attendance domain types and batch validation.
//!
//! A batch is one class/division's marks for one calendar day. Everything in
//! this module is pure: no I/O, no persistence.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::CalendarDay;
use crate::error::CoreError;
use crate::types::{DbId, Roll, Timestamp};

// ---------------------------------------------------------------------------
// Class key
// ---------------------------------------------------------------------------

/// A school grouping key: standard (`std`) plus division (`div`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassKey {
    pub std: String,
    pub div: String,
}

impl ClassKey {
    /// Build a key, trimming surrounding whitespace from both labels.
    pub fn new(std: impl AsRef<str>, div: impl AsRef<str>) -> Self {
        Self {
            std: std.as_ref().trim().to_string(),
            div: div.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.std, self.div)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Message category sent to parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkCategory {
    Absent,
    Late,
}

impl MarkCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }
}

impl fmt::Display for MarkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one recorded mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Present and on time. Recorded, never notified, never locked.
    Ok,
    /// Requires a parent notification and finalizes the roll for the day.
    Notify(MarkCategory),
}

/// Classify a mark. `late` only counts when the student is present.
pub fn classify(present: bool, late: bool) -> Classification {
    match (present, late) {
        (false, _) => Classification::Notify(MarkCategory::Absent),
        (true, true) => Classification::Notify(MarkCategory::Late),
        (true, false) => Classification::Ok,
    }
}

// ---------------------------------------------------------------------------
// Batch input
// ---------------------------------------------------------------------------

/// One student's mark inside a submission batch.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: DbId,
    #[validate(length(min = 1, message = "std must not be empty"))]
    pub std: String,
    #[validate(length(min = 1, message = "div must not be empty"))]
    pub div: String,
    #[validate(range(min = 1, message = "roll must be a positive number"))]
    pub roll: Roll,
    pub present: bool,
    #[serde(default)]
    pub late: bool,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "mobile must not be empty"))]
    pub mobile: String,
}

impl AttendanceEntry {
    pub fn class_key(&self) -> ClassKey {
        ClassKey::new(&self.std, &self.div)
    }

    /// The entry's classification; `late` is ignored for absent students.
    pub fn classification(&self) -> Classification {
        classify(self.present, self.late)
    }

    fn trimmed(mut self) -> Self {
        self.std = self.std.trim().to_string();
        self.div = self.div.trim().to_string();
        self.name = self.name.trim().to_string();
        self.mobile = self.mobile.trim().to_string();
        self
    }
}

/// A raw submission as received from the client.
///
/// Both fields are optional at the wire level so that a missing date or
/// list is reported as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AttendanceBatch {
    pub date: Option<String>,
    pub attendance: Option<Vec<AttendanceEntry>>,
}

/// A batch that passed validation: one class, one day, unique rolls.
#[derive(Debug, Clone)]
pub struct ValidatedBatch {
    pub day: CalendarDay,
    pub class: ClassKey,
    pub entries: Vec<AttendanceEntry>,
}

impl AttendanceBatch {
    /// Validate the batch and normalize its date.
    ///
    /// Rejects the whole batch on the first class of problem found: missing
    /// or unparseable date, missing or empty list, invalid entry fields,
    /// entries spanning more than one class/division, or a roll number or
    /// student id repeated within the batch.
    pub fn validate(self) -> Result<ValidatedBatch, CoreError> {
        let raw_date = self
            .date
            .ok_or_else(|| CoreError::Validation("date is required".into()))?;
        let day = CalendarDay::parse(&raw_date)?;

        let entries: Vec<AttendanceEntry> = self
            .attendance
            .ok_or_else(|| CoreError::Validation("attendance list is required".into()))?
            .into_iter()
            .map(AttendanceEntry::trimmed)
            .collect();

        if entries.is_empty() {
            return Err(CoreError::Validation(
                "attendance list must not be empty".into(),
            ));
        }

        let mut errors = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if let Err(e) = entry.validate() {
                errors.push(format!("attendance[{index}]: {e}"));
            }
        }
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors.join("; ")));
        }

        let class = entries[0].class_key();
        if let Some(other) = entries.iter().find(|e| e.class_key() != class) {
            return Err(CoreError::Validation(format!(
                "batch mixes classes {class} and {}",
                other.class_key()
            )));
        }

        let mut rolls = BTreeSet::new();
        let mut students = BTreeSet::new();
        for entry in &entries {
            if !rolls.insert(entry.roll) {
                return Err(CoreError::Validation(format!(
                    "roll {} appears more than once in the batch",
                    entry.roll
                )));
            }
            if !students.insert(entry.student_id) {
                return Err(CoreError::Validation(format!(
                    "student {} appears more than once in the batch",
                    entry.student_id
                )));
            }
        }

        Ok(ValidatedBatch {
            day,
            class,
            entries,
        })
    }
}

// ---------------------------------------------------------------------------
// Ledger rows
// ---------------------------------------------------------------------------

/// Values written by one ledger upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMark {
    pub student_id: DbId,
    pub class: ClassKey,
    pub roll: Roll,
    pub day: CalendarDay,
    pub present: bool,
    pub late: bool,
}

impl NewMark {
    /// Build the ledger write for a validated entry. `late` is forced to
    /// `false` for absent students.
    pub fn from_entry(entry: &AttendanceEntry, day: CalendarDay) -> Self {
        Self {
            student_id: entry.student_id,
            class: entry.class_key(),
            roll: entry.roll,
            day,
            present: entry.present,
            late: entry.present && entry.late,
        }
    }
}

/// One persisted attendance mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceMark {
    pub id: DbId,
    pub student_id: DbId,
    pub std: String,
    pub div: String,
    pub roll: Roll,
    pub date: CalendarDay,
    pub present: bool,
    pub late: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AttendanceMark {
    pub fn classification(&self) -> Classification {
        classify(self.present, self.late)
    }
}

/// Per-class mark counts for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    pub std: String,
    pub div: String,
    pub total: i64,
    pub absent: i64,
    pub late: i64,
}
