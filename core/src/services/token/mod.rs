//! Token service module for JWT management
//!
//! Stateless HS256 session tokens carrying the subject id and role.
//! There is no refresh, rotation or server-side revocation.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
