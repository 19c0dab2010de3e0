//! MySQL implementation of the CredentialStore trait.
//!
//! Teachers and students are kept in separate tables with a unique index
//! on `username`, which gives per-role uniqueness and lets the same
//! username exist in both spaces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use std::time::Duration;
use uuid::Uuid;

use cm_core::domain::entities::identity::{Identity, Role};
use cm_core::errors::{AuthError, DomainError};
use cm_core::repositories::CredentialStore;

use super::{column, db_error, is_unique_violation, uuid_column};
use crate::database::timeout::with_timeout;
use crate::database::DatabasePool;

/// MySQL implementation of CredentialStore
pub struct MySqlCredentialStore {
    /// Database connection pool
    pool: MySqlPool,
    /// Upper bound for each call
    query_timeout: Duration,
}

impl MySqlCredentialStore {
    /// Create a new MySQL credential store
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Build from a configured pool
    pub fn from_pool(pool: &DatabasePool) -> Self {
        Self::new(pool.get_pool().clone(), pool.query_timeout())
    }

    fn table(role: Role) -> &'static str {
        match role {
            Role::Teacher => "teachers",
            Role::Student => "students",
        }
    }

    /// Convert database row to Identity entity
    fn row_to_identity(role: Role, row: &MySqlRow) -> Result<Identity, DomainError> {
        Ok(Identity {
            id: uuid_column(row, "id")?,
            username: column(row, "username")?,
            password_hash: column(row, "password_hash")?,
            role,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Identity>, DomainError> {
        with_timeout(self.query_timeout, "credentials.find_by_username", async {
            let query = format!(
                "SELECT id, username, password_hash, created_at, updated_at FROM {} WHERE username = ? LIMIT 1",
                Self::table(role)
            );

            let row = sqlx::query(&query)
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find account by username", e))?;

            row.map(|r| Self::row_to_identity(role, &r)).transpose()
        })
        .await
    }

    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Identity>, DomainError> {
        with_timeout(self.query_timeout, "credentials.find_by_id", async {
            let query = format!(
                "SELECT id, username, password_hash, created_at, updated_at FROM {} WHERE id = ? LIMIT 1",
                Self::table(role)
            );

            let row = sqlx::query(&query)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find account by id", e))?;

            row.map(|r| Self::row_to_identity(role, &r)).transpose()
        })
        .await
    }

    async fn create(
        &self,
        role: Role,
        username: &str,
        password_hash: &str,
    ) -> Result<Identity, DomainError> {
        with_timeout(self.query_timeout, "credentials.create", async {
            let identity = Identity::new(role, username, password_hash);
            let query = format!(
                "INSERT INTO {} (id, username, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
                Self::table(role)
            );

            let result = sqlx::query(&query)
                .bind(identity.id.to_string())
                .bind(&identity.username)
                .bind(&identity.password_hash)
                .bind(identity.created_at)
                .bind(identity.updated_at)
                .execute(&self.pool)
                .await;

            match result {
                Ok(_) => Ok(identity),
                Err(e) if is_unique_violation(&e) => {
                    Err(DomainError::from(AuthError::DuplicateUsername { role }))
                }
                Err(e) => Err(db_error("Failed to create account", e)),
            }
        })
        .await
    }

    async fn update_password_hash(
        &self,
        role: Role,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Identity, DomainError> {
        let query = format!(
            "UPDATE {} SET password_hash = ?, updated_at = ? WHERE id = ?",
            Self::table(role)
        );

        let result = with_timeout(self.query_timeout, "credentials.update_password_hash", async {
            sqlx::query(&query)
                .bind(password_hash)
                .bind(Utc::now())
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to update password hash", e))
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: role.display_name().to_string(),
            });
        }

        self.find_by_id(role, id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: role.display_name().to_string(),
            })
    }
}
