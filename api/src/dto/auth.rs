use serde::{Deserialize, Serialize};
use validator::Validate;

use cm_core::Role;

/// Request body for signup and login
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CredentialsRequest {
    /// Account name, unique within the role
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub username: String,

    /// Plaintext password, hashed before storage
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body for signup and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,

    /// Signed session token for the `Authorization: Bearer` header
    pub token: String,

    pub role: Role,
}

impl AuthResponse {
    /// Build the signup response, e.g. "Teacher created successfully"
    pub fn created(auth: cm_core::AuthResponse) -> Self {
        let role = auth.role();
        Self {
            message: format!("{} created successfully", role.display_name()),
            token: auth.token,
            role,
        }
    }

    pub fn logged_in(auth: cm_core::AuthResponse) -> Self {
        Self {
            message: "Logged in successfully".to_string(),
            role: auth.role(),
            token: auth.token,
        }
    }
}

/// Profile of the authenticated account
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
}

/// Request body for changing the password of the authenticated account
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub new_password: String,
}
