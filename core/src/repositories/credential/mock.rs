//! In-memory implementation of CredentialStore for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, Role};
use crate::errors::{AuthError, DomainError};

use super::trait_::CredentialStore;

/// In-memory credential store keyed by role and id
pub struct MockCredentialStore {
    accounts: Arc<RwLock<HashMap<(Role, Uuid), Identity>>>,
    unavailable: AtomicBool,
}

impl MockCredentialStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored accounts for a role
    pub async fn count(&self, role: Role) -> usize {
        let accounts = self.accounts.read().await;
        accounts.keys().filter(|(r, _)| *r == role).count()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::internal("credential store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Identity>, DomainError> {
        self.check_available()?;
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.role == role && a.username == username)
            .cloned())
    }

    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Identity>, DomainError> {
        self.check_available()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&(role, id)).cloned())
    }

    async fn create(
        &self,
        role: Role,
        username: &str,
        password_hash: &str,
    ) -> Result<Identity, DomainError> {
        self.check_available()?;
        // Check and insert under one write lock
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.role == role && a.username == username)
        {
            return Err(AuthError::DuplicateUsername { role }.into());
        }

        let identity = Identity::new(role, username, password_hash);
        accounts.insert((role, identity.id), identity.clone());
        Ok(identity)
    }

    async fn update_password_hash(
        &self,
        role: Role,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Identity, DomainError> {
        self.check_available()?;
        let mut accounts = self.accounts.write().await;
        let identity = accounts
            .get_mut(&(role, id))
            .ok_or_else(|| DomainError::NotFound {
                resource: role.display_name().to_string(),
            })?;
        identity.set_password_hash(password_hash);
        Ok(identity.clone())
    }
}
