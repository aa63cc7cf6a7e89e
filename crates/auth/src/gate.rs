//! Required and Optional authorization policies
//!
//! Both are pure functions of the `Authorization` header value and the
//! token codec.

use axum::http::HeaderValue;

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::{extract_bearer_token, TokenCodec};

/// Required policy: every failure is an error.
pub fn authorize(
    header: Option<&HeaderValue>,
    codec: &TokenCodec,
) -> Result<AuthContext, AuthError> {
    let header = header.ok_or(AuthError::MissingAuthorization)?;
    let token = extract_bearer_token(header)?;
    let claims = codec.verify(token).map_err(AuthError::InvalidToken)?;

    AuthContext::from_claims(claims).ok_or(AuthError::InvalidUserId)
}

/// Optional policy: every failure yields an anonymous caller.
pub fn authorize_optional(header: Option<&HeaderValue>, codec: &TokenCodec) -> Option<AuthContext> {
    match authorize(header, codec) {
        Ok(ctx) => Some(ctx),
        Err(AuthError::MissingAuthorization) => None,
        Err(e) => {
            tracing::debug!(reason = %e, "Ignoring unusable credentials on optional route");
            None
        }
    }
}
