//! User profile API handlers
//!
//! Implements:
//! - GET /v1/users/{id} - Get a user record
//! - PUT /v1/users/{id} - Update your own profile

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use studyhall_auth::AuthUser;
use studyhall_common::{Error, Result, ValidatedJson};
use validator::Validate;

use crate::api::state::UsersState;
use crate::domain::entities::{ProfileUpdate, User};

/// Request for updating a profile; empty or missing fields stay unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 50))]
    pub username: Option<String>,

    #[validate(length(max = 512))]
    pub avatar: Option<String>,
}

/// GET /v1/users/{id} - Get a user record
pub async fn get_user(
    AuthUser(_auth_context): AuthUser,
    State(state): State<UsersState>,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// PUT /v1/users/{id} - Update your own profile
pub async fn update_user(
    AuthUser(auth_context): AuthUser,
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>> {
    if !auth_context.is_user(id) {
        tracing::warn!(
            caller = auth_context.user_id,
            target = id,
            "Rejected profile update for another user"
        );
        return Err(Error::Authorization(
            "You can only update your own profile".to_string(),
        ));
    }

    let update = ProfileUpdate::new(request.username, request.avatar);

    let updated = if update.is_empty() {
        state.users.find_by_id(id).await?
    } else {
        state.users.update_profile(id, update).await?
    };
    let user = updated.ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = id, "Profile updated");

    Ok(Json(user))
}
