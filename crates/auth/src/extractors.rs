//! Axum extractors for authentication
//!
//! Generic over any state `S` where `TokenCodec: FromRef<S>`.
//! When `require_auth`/`optional_auth` already ran for the route, the
//! identity they attached is reused instead of verifying the token again.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::gate::{authorize, authorize_optional};
use crate::jwt::TokenCodec;

/// Authenticated caller (Required policy)
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    TokenCodec: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        let codec = TokenCodec::from_ref(state);
        let ctx = authorize(parts.headers.get(AUTHORIZATION), &codec)?;

        Ok(AuthUser(ctx))
    }
}

/// Caller that may be anonymous (Optional policy); never rejects
#[derive(Debug)]
pub struct MaybeAuthUser(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    TokenCodec: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthContext>() {
            return Ok(MaybeAuthUser(Some(ctx.clone())));
        }

        let codec = TokenCodec::from_ref(state);
        Ok(MaybeAuthUser(authorize_optional(
            parts.headers.get(AUTHORIZATION),
            &codec,
        )))
    }
}
