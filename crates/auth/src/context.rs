//! Identity of an authenticated caller

use crate::claims::SessionClaims;

/// Verified identity attached to a request by the auth gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub username: String,
}

impl AuthContext {
    pub fn new(user_id: i64, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            username: username.into(),
        }
    }

    /// Build from verified claims; `None` when the subject is not a user ID
    pub fn from_claims(claims: SessionClaims) -> Option<Self> {
        let user_id = claims.user_id()?;
        Some(Self {
            user_id,
            email: claims.email,
            username: claims.username,
        })
    }

    /// Check if this caller is the given user
    pub fn is_user(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}
