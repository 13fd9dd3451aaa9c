pub mod admin;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /admin/users                                     create staff account (admin only)
///
/// /attendance                                      submit batch (POST)
/// /attendance/status                               absent, late and locked rolls (GET)
/// /attendance/check-lock                           locked rolls (GET)
/// /attendance/summary                              per-class totals for a day (GET)
/// /attendance/absent-count                         absences over a day range (GET)
///
/// /students                                        list, create (create: admin only)
/// /students/{id}                                   get, update, delete (writes: admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/attendance", attendance::router())
        .nest("/students", students::router())
}
