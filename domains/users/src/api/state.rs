//! Users domain state

use std::sync::Arc;

use axum::extract::FromRef;
use studyhall_auth::TokenCodec;

use crate::repository::UserStore;

/// Application state for the Users domain
#[derive(Clone)]
pub struct UsersState {
    pub users: Arc<dyn UserStore>,
    pub codec: TokenCodec,
}

impl UsersState {
    pub fn new(users: Arc<dyn UserStore>, codec: TokenCodec) -> Self {
        Self { users, codec }
    }
}

impl FromRef<UsersState> for TokenCodec {
    fn from_ref(state: &UsersState) -> Self {
        state.codec.clone()
    }
}
