//! Application configuration loaded from environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// PostgreSQL connection URL. Users are kept in memory when unset.
    pub database_url: Option<String>,
    /// JWT signing secret for session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    pub token_ttl_hours: i64,
    /// Mark the `token` cookie `Secure`.
    pub cookie_secure: bool,
    /// Origin of the single-page frontend, allowed with credentials.
    pub frontend_origin: Option<String>,
    /// Directory with the static frontend build, served as fallback.
    pub static_dir: Option<PathBuf>,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let database_url = non_empty_var("DATABASE_URL");
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "user_portal_jwt_secret_change_in_production".to_string());

        let token_ttl_hours = match non_empty_var("TOKEN_TTL_HOURS") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|h| *h > 0)
                .ok_or(ConfigLoadError::InvalidTokenTtl)?,
            None => 24,
        };

        let cookie_secure = match non_empty_var("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).ok_or(ConfigLoadError::InvalidCookieSecure)?,
            None => false,
        };

        let frontend_origin = non_empty_var("FRONTEND_ORIGIN");
        let static_dir = non_empty_var("STATIC_DIR").map(PathBuf::from);
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_addr,
            database_url,
            jwt_secret,
            token_ttl_hours,
            cookie_secure,
            frontend_origin,
            static_dir,
            log_level,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("TOKEN_TTL_HOURS must be a positive integer")]
    InvalidTokenTtl,
    #[error("COOKIE_SECURE must be a boolean")]
    InvalidCookieSecure,
}
