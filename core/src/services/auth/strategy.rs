//! Authentication strategies
//!
//! One local strategy type parameterized by role, registered as
//! `teacher-local` and `student-local`, plus a bearer strategy for
//! protected requests.

use std::sync::Arc;

use crate::domain::entities::identity::{Identity, Role};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::CredentialStore;
use crate::services::password::{verify_password, PasswordHasher};
use crate::services::token::TokenService;

/// Username/password check against one role's identity space
pub struct LocalStrategy<C: CredentialStore> {
    role: Role,
    store: Arc<C>,
    hasher: Arc<dyn PasswordHasher>,
    // Verified against when the username is unknown so both failure paths cost the same
    dummy_hash: String,
}

impl<C: CredentialStore> LocalStrategy<C> {
    pub fn new(
        role: Role,
        store: Arc<C>,
        hasher: Arc<dyn PasswordHasher>,
        dummy_hash: String,
    ) -> Self {
        Self {
            role,
            store,
            hasher,
            dummy_hash,
        }
    }

    /// Registered strategy name
    pub fn name(&self) -> &'static str {
        Self::name_for(self.role)
    }

    pub fn name_for(role: Role) -> &'static str {
        match role {
            Role::Teacher => "teacher-local",
            Role::Student => "student-local",
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Verify credentials
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - Username exists in this role and the password matches
    /// * `Err(AuthError::InvalidCredentials)` - Unknown username or wrong password
    /// * `Err(DomainError::Internal)` - Store failure
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<Identity> {
        let found = self.store.find_by_username(self.role, username).await?;

        let Some(identity) = found else {
            verify_password(
                self.hasher.clone(),
                password.to_string(),
                self.dummy_hash.clone(),
            )
            .await?;
            tracing::info!(strategy = self.name(), "Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };

        let matches = verify_password(
            self.hasher.clone(),
            password.to_string(),
            identity.password_hash.clone(),
        )
        .await?;

        if !matches {
            tracing::info!(
                strategy = self.name(),
                user_id = %identity.id,
                "Login rejected: password mismatch"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(identity)
    }
}

/// Verifies a bearer token and resolves the live account behind it
pub struct BearerStrategy<C: CredentialStore> {
    store: Arc<C>,
    token_service: Arc<TokenService>,
}

impl<C: CredentialStore> BearerStrategy<C> {
    pub fn new(store: Arc<C>, token_service: Arc<TokenService>) -> Self {
        Self {
            store,
            token_service,
        }
    }

    /// # Returns
    ///
    /// * `Ok(Identity)` - Token valid and its subject still exists
    /// * `Err(TokenError::*)` - Bad signature, expired or malformed token
    /// * `Err(AuthError::UnknownSubject)` - Subject no longer resolves
    pub async fn authenticate(&self, token: &str) -> DomainResult<Identity> {
        let claims = self.token_service.verify(token)?;
        let user_id = claims.user_id().map_err(|_| TokenError::Malformed)?;

        self.store
            .find_by_id(claims.role, user_id)
            .await?
            .ok_or_else(|| AuthError::UnknownSubject.into())
    }
}
