//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use std::env;
use std::str::FromStr;

/// Default session lifetime: 168 hours
pub const DEFAULT_JWT_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,
    pub database_max_connections: u32,

    /// Session token signing
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_secs: i64,

    /// Per-client request throttling
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_requests: u32,

    /// Runtime configuration
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: String,
}

impl std::fmt::Debug for Config {
    #[mutants::skip] // Diagnostic output only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Required keys fail with a descriptive error; numeric keys that are
    /// present but unparseable are rejected rather than silently defaulted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} is required", key))
        };

        let config = Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,

            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "studyhall".to_string()),
            jwt_ttl_secs: parse_or(&lookup, "JWT_TTL_SECS", DEFAULT_JWT_TTL_SECS)?,

            rate_limit_window_secs: parse_or(&lookup, "RATE_LIMIT_WINDOW_SECS", 60)?,
            rate_limit_max_requests: parse_or(&lookup, "RATE_LIMIT_MAX_REQUESTS", 100)?,

            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG")
                .unwrap_or_else(|| "studyhall=debug,tower_http=info".to_string()),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
        };

        Ok(config)
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
