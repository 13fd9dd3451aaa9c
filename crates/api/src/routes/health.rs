use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether parent notifications can actually be delivered.
    pub sms_configured: bool,
}

/// GET /health -- returns service and database health.
///
/// An unconfigured SMS gateway does not degrade the status: attendance is
/// still recorded and locked, only delivery is reported as failed.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = rollcall_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        sms_configured: state.config.sms_configured(),
    })
}

/// Mount health check routes (root-level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
