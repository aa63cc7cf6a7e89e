//! Authentication API handlers
//!
//! Implements:
//! - POST /v1/auth/register - Create an account and start a session
//! - POST /v1/auth/login - Exchange credentials for a session token
//! - GET /v1/auth/me - Current user record
//! - POST /v1/auth/refresh - Exchange a near-expiry token for a new one

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use studyhall_auth::{extract_bearer_token, AuthError, AuthUser, TokenError};
use studyhall_common::{hash_password, verify_password, Error, RepositoryError, Result, ValidatedJson};
use validator::Validate;

use crate::api::state::UsersState;
use crate::domain::entities::{normalize_email, NewUser, User};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Request for account registration
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[validate(
        length(min = 1, max = 50),
        custom(function = "validate_not_blank", message = "Username must not be blank")
    )]
    pub username: String,
}

/// Reject values that are empty once surrounding whitespace is trimmed
fn validate_not_blank(value: &str) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Request for login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Session issued on register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /v1/auth/register - Create an account and start a session
pub async fn register(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let email = normalize_email(&request.email);

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(email_taken());
    }

    let password_hash = hash_blocking(request.password).await?;

    let user = state
        .users
        .create(NewUser {
            email,
            username: request.username.trim().to_string(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration
            RepositoryError::AlreadyExists => email_taken(),
            other => other.into(),
        })?;

    let token = state.codec.issue(user.id, &user.email, &user.username)?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// POST /v1/auth/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = normalize_email(&request.email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        tracing::warn!("Failed login attempt: unknown email");
        return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_blocking(request.password, user.password_hash.clone()).await? {
        tracing::warn!(user_id = user.id, "Failed login attempt: wrong password");
        return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.codec.issue(user.id, &user.email, &user.username)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse { user, token }))
}

/// GET /v1/auth/me - Current user record
pub async fn me(
    AuthUser(auth_context): AuthUser,
    State(state): State<UsersState>,
) -> Result<Json<User>> {
    let user = state
        .users
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// POST /v1/auth/refresh - Exchange a near-expiry token for a new one
///
/// Reads the bearer token directly rather than through the auth gate, so a
/// recently expired token can still be exchanged. Header and token failures
/// answer with the gate's 401; only `StillValid` and encoding failures differ.
pub async fn refresh(
    State(state): State<UsersState>,
    headers: HeaderMap,
) -> std::result::Result<Json<TokenResponse>, Response> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingAuthorization.into_response())?;
    let token = extract_bearer_token(header).map_err(IntoResponse::into_response)?;

    match state.codec.refresh(token) {
        Ok(token) => Ok(Json(TokenResponse { token })),
        Err(e @ (TokenError::StillValid | TokenError::Encoding(_))) => {
            Err(Error::from(e).into_response())
        }
        Err(e) => Err(AuthError::InvalidToken(e).into_response()),
    }
}

fn email_taken() -> Error {
    Error::Conflict("Email is already registered".to_string())
}

async fn hash_blocking(password: String) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {e}")))??;

    Ok(hash)
}

async fn verify_blocking(candidate: String, stored_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
        .await
        .map_err(|e| Error::Internal(format!("Password verification task failed: {e}")))
}
