//! Error types for the optionstore crate
//!
//! This module contains all error types that can be returned by option operations.
//! Absence is never an error: missing keys resolve to defaults or `false`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Option store error: {0}")]
    Store(#[from] store_object::StoreError),

    #[error("Option cache error: {0}")]
    Cache(#[from] cache_system::CacheError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),
}
