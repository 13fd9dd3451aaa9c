//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /        -> list_students
/// POST   /        -> create_student (admin only)
/// GET    /{id}    -> get_student
/// PUT    /{id}    -> update_student (admin only)
/// DELETE /{id}    -> delete_student (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
}
