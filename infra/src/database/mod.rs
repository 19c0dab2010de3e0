//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management and schema bootstrap
//! - Store implementations for accounts, courses and purchases
//! - A per-call timeout so no store call waits forever

pub mod connection;
pub mod mysql;
pub mod schema;
pub mod timeout;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatus};
pub use mysql::{MySqlCourseRepository, MySqlCredentialStore};
pub use timeout::with_timeout;
