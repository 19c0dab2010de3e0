//! Claims carried inside the signed session token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Role;

/// Session token lifetime (1 hour)
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// JWT issuer
pub const JWT_ISSUER: &str = "openlogic";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Role of the subject; unknown values fail to decode
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a subject, issued `now` and valid for `ttl_seconds`
    ///
    /// Returns `None` when the expiry does not fit in an `i64`.
    pub fn new(
        user_id: Uuid,
        role: Role,
        now: i64,
        ttl_seconds: i64,
        issuer: &str,
    ) -> Option<Self> {
        let exp = now.checked_add(ttl_seconds)?;

        Some(Self {
            sub: user_id.to_string(),
            role,
            iat: now,
            exp,
            iss: issuer.to_string(),
        })
    }

    /// Parses the subject back into an account id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
