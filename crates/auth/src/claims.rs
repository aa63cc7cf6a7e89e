//! JWT claims types

use serde::{Deserialize, Serialize};

/// Identity claims carried by every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (numeric user ID, decimal)
    pub sub: String,
    pub email: String,
    pub username: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
    /// Token ID, unique per issuance
    pub jti: String,
}

impl SessionClaims {
    /// Numeric user ID, if `sub` holds one
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
