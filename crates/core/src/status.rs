//! Read-side projections of a class/day.
//!
//! The absent and late sets are derived from ledger marks so they always
//! match what was recorded. A roll is in `absent` iff its mark has
//! `present = false`, and in `late` iff `present && late`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::attendance::{AttendanceMark, Classification, MarkCategory};
use crate::types::Roll;

/// Absent and late rolls for one class/day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceStatus {
    pub absent: BTreeSet<Roll>,
    pub late: BTreeSet<Roll>,
}

impl AttendanceStatus {
    pub fn from_marks<'a>(marks: impl IntoIterator<Item = &'a AttendanceMark>) -> Self {
        let mut status = Self::default();
        for mark in marks {
            match mark.classification() {
                Classification::Notify(MarkCategory::Absent) => {
                    status.absent.insert(mark.roll);
                }
                Classification::Notify(MarkCategory::Late) => {
                    status.late.insert(mark.roll);
                }
                Classification::Ok => {}
            }
        }
        status
    }
}

/// [`AttendanceStatus`] plus the finalized rolls, for graying out rows in
/// the submission grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassDayStatus {
    pub absent: BTreeSet<Roll>,
    pub late: BTreeSet<Roll>,
    pub locked: BTreeSet<Roll>,
}

impl ClassDayStatus {
    pub fn new(marks: &[AttendanceMark], locked: BTreeSet<Roll>) -> Self {
        let AttendanceStatus { absent, late } = AttendanceStatus::from_marks(marks);
        Self {
            absent,
            late,
            locked,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::calendar::CalendarDay;

    fn mark(roll: Roll, present: bool, late: bool) -> AttendanceMark {
        let now = Utc::now();
        AttendanceMark {
            id: roll.into(),
            student_id: 100 + i64::from(roll),
            std: "5".into(),
            div: "A".into(),
            roll,
            date: CalendarDay::parse("2024-03-01").unwrap(),
            present,
            late,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn marks_are_projected_by_classification() {
        let marks = vec![
            mark(1, false, false),
            mark(2, true, true),
            mark(3, true, false),
            mark(4, false, true),
        ];

        let status = AttendanceStatus::from_marks(&marks);

        assert_eq!(status.absent, BTreeSet::from([1, 4]));
        assert_eq!(status.late, BTreeSet::from([2]));
    }

    #[test]
    fn class_day_status_carries_locked_set() {
        let marks = vec![mark(1, false, false)];
        let status = ClassDayStatus::new(&marks, BTreeSet::from([1]));

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["absent"], serde_json::json!([1]));
        assert_eq!(json["late"], serde_json::json!([]));
        assert_eq!(json["locked"], serde_json::json!([1]));
    }
}
