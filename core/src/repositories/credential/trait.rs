//! Credential store trait defining persistence for teacher and student accounts.
//!
//! Teachers and students live in disjoint identity spaces: a username is
//! unique within one role, and the same username may exist once per role.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, Role};
use crate::errors::DomainError;

/// Repository trait for role-partitioned account persistence
///
/// # Example
/// ```no_run
/// # use cm_core::repositories::CredentialStore;
/// # use cm_core::domain::entities::identity::Role;
/// # async fn example(store: &impl CredentialStore) -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(teacher) = store.find_by_username(Role::Teacher, "bob").await? {
///     println!("Found teacher {}", teacher.id);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an account by username within the given role
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Account found
    /// * `Ok(None)` - No account with that username in this role
    /// * `Err(DomainError)` - Store failure
    async fn find_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Identity>, DomainError>;

    /// Find an account by id within the given role
    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Identity>, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(Identity)` - The created account
    /// * `Err(DomainError::Auth(AuthError::DuplicateUsername))` - Username taken in this role
    async fn create(
        &self,
        role: Role,
        username: &str,
        password_hash: &str,
    ) -> Result<Identity, DomainError>;

    /// Replace the password hash of an existing account
    ///
    /// # Returns
    /// * `Ok(Identity)` - The updated account
    /// * `Err(DomainError::NotFound)` - No such account
    async fn update_password_hash(
        &self,
        role: Role,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Identity, DomainError>;
}
