//! Admin-only staff account management.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rollcall_core::error::CoreError;
use rollcall_core::roles::{is_known_role, ROLE_TEACHER};
use rollcall_core::student::validate_label;
use rollcall_db::models::user::{CreateUser, UserResponse};
use rollcall_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    /// Defaults to `teacher`.
    pub role: Option<String>,
}

/// POST /api/v1/admin/users
///
/// Create a staff account. Admin only.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let username = input.username.trim().to_string();
    validate_label("username", &username)?;

    let role = input.role.unwrap_or_else(|| ROLE_TEACHER.to_string());
    if !is_known_role(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "unknown role '{role}'"
        ))));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, admin_id = admin.user_id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}
