//! In-memory user store for tests and database-free local runs

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use studyhall_common::RepositoryError;

use super::UserStore;
use crate::domain::entities::{NewUser, ProfileUpdate, User};

#[derive(Default)]
struct Table {
    last_id: i64,
    users: HashMap<i64, User>,
}

/// `UserStore` backed by a process-local map; IDs start at 1
#[derive(Default)]
pub struct InMemoryUserStore {
    table: Mutex<Table>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a user, returning the removed record
    pub fn remove(&self, id: i64) -> Option<User> {
        self.lock().users.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.lock();
        Ok(table.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.lock();
        if table.users.values().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::AlreadyExists);
        }

        table.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: table.last_id,
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            avatar: None,
            created_at: now,
            updated_at: now,
        };
        table.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        let mut table = self.lock();
        let Some(user) = table.users.get_mut(&id) else {
            return Ok(None);
        };

        update.apply_to(user);
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}
