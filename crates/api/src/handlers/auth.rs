//! Handlers for the `/auth` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use rollcall_core::error::CoreError;
use rollcall_db::models::user::UserResponse;
use rollcall_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and return an access token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(input) = payload?;
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %user.username, "Login rejected");
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(&user),
    }))
}
