//! Route definitions for Users domain API

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use studyhall_auth::require_auth;

use super::handlers::{auth, users};
use super::state::UsersState;

/// Create public authentication routes
fn auth_routes() -> Router<UsersState> {
    Router::new()
        .route("/v1/auth/register", post(auth::register))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/refresh", post(auth::refresh))
}

/// Create routes behind the Required gate
fn protected_routes(state: &UsersState) -> Router<UsersState> {
    Router::new()
        .route("/v1/auth/me", get(auth::me))
        .route(
            "/v1/users/{id}",
            get(users::get_user).put(users::update_user),
        )
        .route_layer(from_fn_with_state(state.codec.clone(), require_auth))
}

/// Create all Users domain API routes
pub fn routes(state: &UsersState) -> Router<UsersState> {
    Router::new()
        .merge(auth_routes())
        .merge(protected_routes(state))
}
