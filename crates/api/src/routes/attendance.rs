//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST /               -> submit_attendance
/// GET  /status         -> get_status
/// GET  /check-lock     -> check_lock
/// GET  /summary        -> daily_summary
/// GET  /absent-count   -> absent_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(attendance::submit_attendance))
        .route("/status", get(attendance::get_status))
        .route("/check-lock", get(attendance::check_lock))
        .route("/summary", get(attendance::daily_summary))
        .route("/absent-count", get(attendance::absent_count))
}
