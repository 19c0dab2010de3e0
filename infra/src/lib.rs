//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OpenLogic backend.
//! It provides the MySQL connection pool and the MySQL-backed credential
//! and course stores.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{
    with_timeout, DatabasePool, MySqlCourseRepository, MySqlCredentialStore, PoolStatus,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
