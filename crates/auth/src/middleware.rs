//! Route-group middleware for the auth gate
//!
//! Layer with `axum::middleware::from_fn_with_state(codec, require_auth)`.
//! On success the verified `AuthContext` is stored in the request
//! extensions, where `AuthUser`/`MaybeAuthUser` pick it up.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AuthError;
use crate::gate::{authorize, authorize_optional};
use crate::jwt::TokenCodec;

/// Required policy: short-circuits with 401 on any failure
pub async fn require_auth(
    State(codec): State<TokenCodec>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let ctx = authorize(request.headers().get(AUTHORIZATION), &codec)?;
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}

/// Optional policy: always continues, with or without an identity
pub async fn optional_auth(
    State(codec): State<TokenCodec>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ctx) = authorize_optional(request.headers().get(AUTHORIZATION), &codec) {
        request.extensions_mut().insert(ctx);
    }

    next.run(request).await
}
