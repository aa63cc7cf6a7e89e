//! Authentication configuration

use chrono::Duration;

/// Remaining lifetime above which a token is not yet eligible for refresh
pub const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 24 * 60 * 60;

/// How long after expiry a token may still be exchanged for a new one
pub const DEFAULT_REFRESH_GRACE_SECS: i64 = 24 * 60 * 60;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub token_ttl: Duration,
    pub refresh_threshold: Duration,
    pub refresh_grace: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, issuer: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: issuer.into(),
            token_ttl,
            refresh_threshold: Duration::seconds(DEFAULT_REFRESH_THRESHOLD_SECS),
            refresh_grace: Duration::seconds(DEFAULT_REFRESH_GRACE_SECS),
        }
    }
}

impl From<&studyhall_common::Config> for AuthConfig {
    fn from(config: &studyhall_common::Config) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.jwt_issuer.clone(),
            Duration::seconds(config.jwt_ttl_secs),
        )
    }
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip] // Diagnostic output only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("token_ttl", &self.token_ttl)
            .field("refresh_threshold", &self.refresh_threshold)
            .field("refresh_grace", &self.refresh_grace)
            .finish()
    }
}
