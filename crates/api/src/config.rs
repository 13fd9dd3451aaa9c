use rollcall_core::templates::MessageTemplates;
use rollcall_notify::{templates_from_env, SmsConfig};

use crate::auth::jwt::JwtConfig;
use crate::bootstrap::BootstrapAdmin;

/// Server configuration loaded from environment variables.
///
/// Only `DATABASE_URL` and `JWT_SECRET` are mandatory. Without `SMS_PASSWORD`
/// the server still records attendance but every parent notification is
/// reported as failed.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Gateway credentials; `None` when `SMS_PASSWORD` is unset.
    pub sms: Option<SmsConfig>,
    /// Parent message bodies, with `SMS_TEMPLATE_*` overrides applied.
    pub sms_templates: MessageTemplates,
    /// First-run admin account, seeded only into an empty `users` table.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `DATABASE_URL`             | required                |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `BOOTSTRAP_ADMIN_USERNAME` | unset                   |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                   |
    ///
    /// JWT and `SMS_*` variables are documented on [`JwtConfig::from_env`]
    /// and [`SmsConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            sms: SmsConfig::from_env(),
            sms_templates: templates_from_env(),
            bootstrap_admin: BootstrapAdmin::from_env(),
        }
    }

    pub fn sms_configured(&self) -> bool {
        self.sms.is_some()
    }
}
