//! Server configuration, read once at startup.

use std::path::PathBuf;

use crate::ai::AiConfig;
use crate::auth::jwt::JwtConfig;
use crate::email::EmailConfig;

/// Everything the server needs besides the database pool.
///
/// Defaults suit local development; production overrides via environment
/// variables. Only `JWT_SECRET` is mandatory.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory for meeting attachments (default: `./uploads`).
    pub upload_dir: PathBuf,
    /// Token signing secret and lifetimes.
    pub jwt: JwtConfig,
    /// LLM diagnostics; `None` when `AI_API_URL` is unset.
    pub ai: Option<AiConfig>,
    /// SMTP invitation mail; `None` when `SMTP_HOST` is unset.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `./uploads`                |
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "3000")
                .parse()
                .expect("PORT must be a valid u16"),
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64"),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "./uploads")),
            jwt: JwtConfig::from_env(),
            ai: AiConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
