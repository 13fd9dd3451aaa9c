//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rollcall_core::error::CoreError;
use rollcall_core::roles::{is_known_role, ROLE_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires a school staff role (`admin` or `teacher`).
///
/// A validly signed token carrying any other role is rejected with 403, so
/// attendance can only be recorded or read by staff accounts.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_known_role(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
