//! Handlers for attendance submission and class/day queries.
//!
//! All endpoints require a staff account via [`RequireStaff`]. Query parameters
//! are validated by hand so that missing values produce the standard JSON
//! error body rather than a bare extractor rejection.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use rollcall_core::attendance::{AttendanceBatch, ClassKey};
use rollcall_core::calendar::{CalendarDay, DayRange};
use rollcall_core::error::CoreError;
use rollcall_core::ledger::AttendanceLedger;
use rollcall_core::submission::{EntryError, SubmissionSummary};
use rollcall_core::types::Roll;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// `?std=&div=&date=` for class/day lookups.
#[derive(Debug, Default, Deserialize)]
pub struct ClassDayParams {
    pub std: Option<String>,
    pub div: Option<String>,
    pub date: Option<String>,
}

impl ClassDayParams {
    fn resolve(self) -> AppResult<(ClassKey, CalendarDay)> {
        let std = required("std", self.std)?;
        let div = required("div", self.div)?;
        let date = required("date", self.date)?;
        Ok((ClassKey::new(std, div), CalendarDay::parse(&date)?))
    }
}

/// `?date=` for the daily summary.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub date: Option<String>,
}

/// `?std=&div=&from=&to=` for absence counts. `to` defaults to `from`.
#[derive(Debug, Default, Deserialize)]
pub struct AbsentCountParams {
    pub std: Option<String>,
    pub div: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("{field} is required"))))
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Notification counters returned to the submitting client.
#[derive(Debug, Serialize)]
pub struct SmsSummary {
    pub processed: usize,
    pub skipped: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Body of a successful `POST /attendance`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub sms_summary: SmsSummary,
    pub errors: Vec<EntryError>,
}

impl From<SubmissionSummary> for SubmissionResponse {
    fn from(summary: SubmissionSummary) -> Self {
        Self {
            success: true,
            sms_summary: SmsSummary {
                processed: summary.processed,
                skipped: summary.skipped,
                sent: summary.sent,
                failed: summary.failed,
            },
            errors: summary.errors,
        }
    }
}

/// Body of `GET /attendance/check-lock`.
#[derive(Debug, Serialize)]
pub struct LockResponse {
    pub locked: BTreeSet<Roll>,
}

/// Absence count for one class over a day range.
#[derive(Debug, Serialize)]
pub struct AbsentCount {
    pub std: String,
    pub div: String,
    pub from: CalendarDay,
    pub to: CalendarDay,
    pub absent: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/attendance
///
/// Record one class's marks for one day and notify parents of newly absent
/// or late students. The batch runs on its own task so that the request
/// timeout cannot interrupt it between locking and dispatch.
pub async fn submit_attendance(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    payload: Result<Json<AttendanceBatch>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(batch) = payload?;
    let batch = batch.validate()?;
    let class = batch.class.clone();
    let day = batch.day;

    let service = Arc::clone(&state.attendance);
    let summary = tokio::spawn(async move { service.submit_validated(batch).await })
        .await
        .map_err(|e| AppError::InternalError(format!("Attendance task failed: {e}")))??;

    tracing::info!(
        user_id = auth.user_id,
        class = %class,
        day = %day,
        processed = summary.processed,
        skipped = summary.skipped,
        sent = summary.sent,
        failed = summary.failed,
        "Attendance submitted",
    );

    Ok(Json(SubmissionResponse::from(summary)))
}

/// GET /api/v1/attendance/status?std=&div=&date=
///
/// Absent and late rolls recorded for the class/day, plus the locked rolls.
pub async fn get_status(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ClassDayParams>,
) -> AppResult<impl IntoResponse> {
    let (class, day) = params.resolve()?;
    let status = state.attendance.status(&class, day).await?;
    Ok(Json(status))
}

/// GET /api/v1/attendance/check-lock?std=&div=&date=
///
/// Rolls already finalized for the class/day.
pub async fn check_lock(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ClassDayParams>,
) -> AppResult<impl IntoResponse> {
    let (class, day) = params.resolve()?;
    let locked = state.attendance.locked(&class, day).await?;
    Ok(Json(LockResponse { locked }))
}

/// GET /api/v1/attendance/summary?date=
///
/// Per-class totals of recorded, absent and late marks for one day.
pub async fn daily_summary(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> AppResult<impl IntoResponse> {
    let day = CalendarDay::parse(&required("date", params.date)?)?;
    let counts = state
        .attendance
        .ledger()
        .count_by_class(day)
        .await
        .map_err(CoreError::from)?;
    Ok(Json(DataResponse { data: counts }))
}

/// GET /api/v1/attendance/absent-count?std=&div=&from=&to=
pub async fn absent_count(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<AbsentCountParams>,
) -> AppResult<impl IntoResponse> {
    let class = ClassKey::new(
        required("std", params.std)?,
        required("div", params.div)?,
    );
    let from = CalendarDay::parse(&required("from", params.from)?)?;
    let to = match params.to.filter(|v| !v.trim().is_empty()) {
        Some(raw) => CalendarDay::parse(&raw)?,
        None => from,
    };
    let range = DayRange::new(from, to)?;

    let absent = state
        .attendance
        .ledger()
        .count_absent(&class, range)
        .await
        .map_err(CoreError::from)?;

    Ok(Json(DataResponse {
        data: AbsentCount {
            std: class.std,
            div: class.div,
            from,
            to,
            absent,
        },
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn class_day_params_require_all_fields() {
        let params = ClassDayParams {
            std: Some("5".into()),
            div: None,
            date: Some("2024-03-01".into()),
        };
        assert_matches!(
            params.resolve(),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "div is required"
        );
    }

    #[test]
    fn class_day_params_normalize_class_and_date() {
        let params = ClassDayParams {
            std: Some(" 5 ".into()),
            div: Some("A".into()),
            date: Some("2024-03-01T23:59:59".into()),
        };
        let (class, day) = params.resolve().unwrap();
        assert_eq!(class, ClassKey::new("5", "A"));
        assert_eq!(day.to_string(), "2024-03-01");
    }

    #[test]
    fn blank_param_counts_as_missing() {
        assert_matches!(required("date", Some("  ".into())), Err(AppError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn submission_response_uses_camel_case() {
        let summary = SubmissionSummary {
            processed: 2,
            skipped: 1,
            sent: 1,
            failed: 0,
            errors: vec![EntryError {
                student_id: 9,
                roll: 4,
                error: "upsert attendance mark: timeout".into(),
            }],
            outcomes: vec![],
        };
        let json = serde_json::to_value(SubmissionResponse::from(summary)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["smsSummary"]["processed"], 2);
        assert_eq!(json["smsSummary"]["skipped"], 1);
        assert_eq!(json["errors"][0]["studentId"], 9);
    }
}
