//! Authentication result returned by signup and login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::identity::{Identity, Role};

/// Outcome of a successful signup or login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// The authenticated account
    pub identity: Identity,

    /// Signed session token
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn new(identity: Identity, token: String, expires_in: i64) -> Self {
        Self {
            identity,
            token,
            expires_in,
        }
    }

    /// Role of the authenticated account
    pub fn role(&self) -> Role {
        self.identity.role
    }
}
