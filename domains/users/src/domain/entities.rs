//! Domain entities for the Studyhall users domain

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User entity
///
/// `password_hash` never leaves the service: it is skipped when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Partial profile update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Build an update where empty or blank values mean "unchanged"
    pub fn new(username: Option<String>, avatar: Option<String>) -> Self {
        Self {
            username: non_blank(username),
            avatar: non_blank(avatar),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar.is_none()
    }

    /// Apply the update to a user in place
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone());
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Canonical form of an email address used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
