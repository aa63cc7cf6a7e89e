//! Identity store for the users domain

pub mod memory;
pub mod users;

use async_trait::async_trait;
use studyhall_common::RepositoryError;

use crate::domain::entities::{NewUser, ProfileUpdate, User};

pub use memory::InMemoryUserStore;
pub use users::PgUserStore;

/// Lookup and persistence of user records.
///
/// Emails are stored and matched in their normalized form; `create` fails
/// with `RepositoryError::AlreadyExists` when the email is taken.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// Returns `None` when no user has the given ID
    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError>;
}
