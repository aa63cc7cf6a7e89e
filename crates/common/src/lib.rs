//! Shared utilities, configuration, and error handling for Studyhall
//!
//! This crate provides common functionality used across the Studyhall API:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Password hashing
//! - Validated JSON extraction

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use crypto::{hash_password, verify_password};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
