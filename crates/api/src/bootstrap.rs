//! First-run admin account seeding.
//!
//! When the `users` table is empty and `BOOTSTRAP_ADMIN_USERNAME` /
//! `BOOTSTRAP_ADMIN_PASSWORD` are set, one admin account is created so the
//! school can log in and enroll staff. Once any user exists this is a no-op.

use rollcall_core::roles::ROLE_ADMIN;
use rollcall_db::models::user::CreateUser;
use rollcall_db::repositories::UserRepo;
use rollcall_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

/// Error type for admin seeding failures.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bootstrap admin password rejected: {0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Credentials for the first admin account.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl BootstrapAdmin {
    /// Returns `None` unless both variables are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("BOOTSTRAP_ADMIN_USERNAME").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        let username = username.trim().to_string();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self { username, password })
    }
}

/// Create the admin account if no user exists yet.
///
/// Returns `true` if an account was created.
pub async fn seed_admin(pool: &DbPool, admin: &BootstrapAdmin) -> Result<bool, BootstrapError> {
    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users already present, skipping admin bootstrap");
        return Ok(false);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(BootstrapError::WeakPassword)?;
    let password_hash =
        hash_password(&admin.password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
