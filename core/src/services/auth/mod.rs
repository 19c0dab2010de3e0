//! Authentication service module
//!
//! This module provides:
//! - Local username/password strategies, one per role
//! - The bearer-token strategy that re-resolves the token subject
//! - Signup, login, profile lookup and password change

mod service;
mod strategy;

#[cfg(test)]
mod tests;

pub use service::{AuthService, BearerAuthenticator};
pub use strategy::{BearerStrategy, LocalStrategy};
