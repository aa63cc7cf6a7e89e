//! Per-client fixed-window rate limiting for the Studyhall API
//!
//! - `RateLimiter`: the counter table and the allow/deny decision
//! - `Sweeper`: owned background task evicting expired windows
//! - `rate_limit`: axum middleware keyed by client address

mod limiter;
mod middleware;
mod sweeper;

pub use limiter::RateLimiter;
pub use middleware::{client_id, rate_limit};
pub use sweeper::Sweeper;
