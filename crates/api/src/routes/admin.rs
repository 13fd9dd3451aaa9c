//! Route definitions for the `/admin` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /users    -> create_user (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(users::create_user))
}
