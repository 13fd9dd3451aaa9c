use std::sync::Arc;

use rollcall_core::submission::SubmissionService;
use rollcall_db::store::{PgAttendanceLedger, PgLockTracker};
use rollcall_notify::SmsDispatcher;

use crate::config::ServerConfig;

/// The attendance orchestrator wired to Postgres and the SMS gateway.
pub type AttendanceService = SubmissionService<PgAttendanceLedger, PgLockTracker, SmsDispatcher>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rollcall_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Attendance submission and status service.
    pub attendance: Arc<AttendanceService>,
}

impl AppState {
    pub fn new(pool: rollcall_db::DbPool, config: ServerConfig, notifier: SmsDispatcher) -> Self {
        let attendance = SubmissionService::new(
            PgAttendanceLedger::new(pool.clone()),
            PgLockTracker::new(pool.clone()),
            notifier,
        );
        Self {
            pool,
            config: Arc::new(config),
            attendance: Arc::new(attendance),
        }
    }
}
