//! API endpoint integration tests
//!
//! Drives the fully composed router (middleware stack included) over the
//! in-memory user store.

#![allow(dead_code)]

mod auth;
mod common;
mod ratelimit;
mod users;
