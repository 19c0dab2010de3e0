//! Configuration for the token service

use cm_shared::config::JwtConfig;

use crate::domain::entities::token::{DEFAULT_TOKEN_EXPIRY_SECONDS, JWT_ISSUER};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_expiry_seconds: i64,
    /// Expected `iss` claim
    pub issuer: String,
}

impl TokenServiceConfig {
    /// Config with the default one-hour lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            issuer: JWT_ISSUER.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            issuer: config.issuer.clone(),
        }
    }
}
