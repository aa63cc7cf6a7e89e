//! PostgreSQL user store

use async_trait::async_trait;
use sqlx::PgPool;
use studyhall_common::RepositoryError;

use super::UserStore;
use crate::domain::entities::{NewUser, ProfileUpdate, User};

const USER_COLUMNS: &str = "id, email, username, password_hash, avatar, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.email)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                avatar = COALESCE($3, avatar),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(update.username)
            .bind(update.avatar)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
