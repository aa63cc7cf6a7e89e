//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Token codec failure
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature or algorithm is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("token is still valid")]
    StillValid,

    #[error("failed to sign token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

impl From<TokenError> for studyhall_common::Error {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::StillValid => studyhall_common::Error::Conflict(
                "Token is still valid; refresh is not needed yet".to_string(),
            ),
            TokenError::Encoding(e) => {
                studyhall_common::Error::Internal(format!("Failed to sign token: {}", e))
            }
            TokenError::Malformed | TokenError::SignatureInvalid | TokenError::Expired => {
                studyhall_common::Error::Authentication("Invalid or expired token".to_string())
            }
        }
    }
}

/// Authorization gate failure
///
/// Variants exist for logging; every one renders the same 401 response so
/// callers cannot tell a missing header from a forged token.
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken(TokenError),
    InvalidUserId,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthorization => write!(f, "authorization header missing"),
            AuthError::InvalidAuthorizationFormat => {
                write!(f, "authorization header is not a bearer token")
            }
            AuthError::InvalidToken(e) => write!(f, "{}", e),
            AuthError::InvalidUserId => write!(f, "token subject is not a user ID"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Request rejected by auth gate");

        let body = Json(json!({
            "error": {
                "code": "UNAUTHORIZED",
                "message": "Unauthorized",
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
