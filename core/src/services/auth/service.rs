//! Main authentication service implementation

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, Role};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::CredentialStore;
use crate::services::password::{hash_password, verify_password, PasswordHasher};
use crate::services::token::TokenService;

use super::strategy::{BearerStrategy, LocalStrategy};

/// Resolves a bearer token to an account.
///
/// Object safe so the HTTP layer can hold it without knowing the store type.
#[async_trait]
pub trait BearerAuthenticator: Send + Sync {
    async fn authenticate_bearer(&self, token: &str) -> DomainResult<Identity>;
}

/// Authentication service for signup, login and account maintenance
pub struct AuthService<C: CredentialStore> {
    /// Credential store for both roles
    store: Arc<C>,
    /// Password hasher shared by every strategy
    hasher: Arc<dyn PasswordHasher>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    teacher_local: LocalStrategy<C>,
    student_local: LocalStrategy<C>,
    bearer: BearerStrategy<C>,
}

impl<C: CredentialStore> AuthService<C> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store
    /// * `hasher` - Password hasher
    /// * `token_service` - Token issuer/verifier
    pub fn new(
        store: Arc<C>,
        hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<TokenService>,
    ) -> DomainResult<Self> {
        let dummy_hash = hasher.hash("timing-equalization-placeholder")?;

        let teacher_local = LocalStrategy::new(
            Role::Teacher,
            store.clone(),
            hasher.clone(),
            dummy_hash.clone(),
        );
        let student_local =
            LocalStrategy::new(Role::Student, store.clone(), hasher.clone(), dummy_hash);
        let bearer = BearerStrategy::new(store.clone(), token_service.clone());

        Ok(Self {
            store,
            hasher,
            token_service,
            teacher_local,
            student_local,
            bearer,
        })
    }

    /// Local strategy for a role
    pub fn local_strategy(&self, role: Role) -> &LocalStrategy<C> {
        match role {
            Role::Teacher => &self.teacher_local,
            Role::Student => &self.student_local,
        }
    }

    /// Look up a local strategy by its registered name
    pub fn strategy(&self, name: &str) -> Option<&LocalStrategy<C>> {
        [&self.teacher_local, &self.student_local]
            .into_iter()
            .find(|s| s.name() == name)
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Register a new account and issue its first token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Account created, token issued
    /// * `Err(ValidationError::RequiredField)` - Blank username or password
    /// * `Err(AuthError::DuplicateUsername)` - Username taken in this role
    pub async fn signup(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        require_credentials(username, password)?;

        if self.store.find_by_username(role, username).await?.is_some() {
            tracing::info!(role = %role, "Signup rejected: username taken");
            return Err(AuthError::DuplicateUsername { role }.into());
        }

        let password_hash = hash_password(self.hasher.clone(), password.to_string()).await?;
        // The store enforces uniqueness again for concurrent signups
        let identity = self.store.create(role, username, &password_hash).await?;
        let token = self.token_service.issue(&identity)?;

        tracing::info!(role = %role, user_id = %identity.id, "Account created");

        Ok(AuthResponse::new(
            identity,
            token,
            self.token_service.expiry_seconds(),
        ))
    }

    /// Authenticate through the role's local strategy and issue a token
    pub async fn login(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = self
            .local_strategy(role)
            .authenticate(username, password)
            .await?;
        let token = self.token_service.issue(&identity)?;

        tracing::info!(role = %role, user_id = %identity.id, "Login succeeded");

        Ok(AuthResponse::new(
            identity,
            token,
            self.token_service.expiry_seconds(),
        ))
    }

    /// Resolve a bearer token to its live account
    pub async fn authenticate_bearer(&self, token: &str) -> DomainResult<Identity> {
        self.bearer.authenticate(token).await
    }

    /// Current account data
    pub async fn profile(&self, role: Role, id: Uuid) -> DomainResult<Identity> {
        self.store
            .find_by_id(role, id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: role.display_name().to_string(),
            })
    }

    /// Replace the password after checking the current one
    ///
    /// Tokens issued before the change stay valid until they expire.
    pub async fn change_password(
        &self,
        role: Role,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "newPassword".to_string(),
            }
            .into());
        }

        let identity = self.profile(role, id).await?;
        let matches = verify_password(
            self.hasher.clone(),
            current_password.to_string(),
            identity.password_hash.clone(),
        )
        .await?;
        if !matches {
            tracing::info!(role = %role, user_id = %id, "Password change rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let password_hash = hash_password(self.hasher.clone(), new_password.to_string()).await?;
        self.store
            .update_password_hash(role, id, &password_hash)
            .await?;

        tracing::info!(role = %role, user_id = %id, "Password changed");
        Ok(())
    }
}

#[async_trait]
impl<C: CredentialStore> BearerAuthenticator for AuthService<C> {
    async fn authenticate_bearer(&self, token: &str) -> DomainResult<Identity> {
        AuthService::authenticate_bearer(self, token).await
    }
}

fn require_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "username".to_string(),
        });
    }
    if password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        });
    }
    Ok(())
}
