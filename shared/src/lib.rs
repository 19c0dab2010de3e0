//! Shared configuration and common types for the OpenLogic server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded once at startup
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
