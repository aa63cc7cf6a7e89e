//! Rate limiting middleware layer for axum
//!
//! Layer with `axum::middleware::from_fn_with_state(limiter, rate_limit)`.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use studyhall_common::Error;

use crate::limiter::RateLimiter;

/// Reject the request with 429 once its client is over the limit
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let client = client_id(&request);

    if !limiter.allow(&client) {
        tracing::warn!(client = %client, limit = limiter.limit(), "Rate limit exceeded");
        return Err(Error::RateLimit(
            "Too many requests, please try again later".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Identify the client behind a request by source address.
///
/// Prefers the first `X-Forwarded-For` hop, then `X-Real-IP`, then the
/// socket peer. Forwarding headers are trusted as-is, so the service is
/// expected to sit behind a proxy that sets them.
pub fn client_id(request: &Request) -> String {
    let headers = request.headers();

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
