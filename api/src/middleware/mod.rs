//! HTTP middleware for the API

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtAuth};
