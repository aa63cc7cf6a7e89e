//! Session tokens and request authorization for the Studyhall API
//!
//! Provides the JWT token codec, the Required/Optional auth gate, and axum
//! extractors and middleware that work with any state implementing
//! `FromRef<S>` for `TokenCodec`.

mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
mod jwt;
mod middleware;

pub use claims::SessionClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::{AuthError, TokenError};
pub use extractors::{AuthUser, MaybeAuthUser};
pub use gate::{authorize, authorize_optional};
pub use jwt::{extract_bearer_token, TokenCodec};
pub use middleware::{optional_auth, require_auth};
