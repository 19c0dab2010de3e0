//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{parsed_or, required, ConfigError};

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HS256 signing
    #[serde(skip_serializing)]
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: String::from("openlogic"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt cost factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(lookup, "JWT_SECRET")?;
        let bcrypt_cost = parsed_or(lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;

        Ok(Self {
            jwt: JwtConfig::new(secret),
            bcrypt_cost,
        })
    }
}

fn default_bcrypt_cost() -> u32 {
    DEFAULT_BCRYPT_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new("my-secret");
        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.issuer, "openlogic");
    }

    #[test]
    fn test_secret_is_not_serialized() {
        let config = AuthConfig::new(JwtConfig::new("top-secret"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("top-secret"));
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
    }
}
