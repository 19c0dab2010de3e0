//! Password hashing
//!
//! bcrypt hashing behind a trait so tests can run at the minimum cost.
//! Hashing is CPU-bound, so the async helpers move it onto tokio's
//! blocking pool.

use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};

/// One-way salted password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password; identical input yields a different hash per call
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored hash.
    /// A malformed hash verifies as `false`.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(cm_shared::config::auth::DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            DomainError::internal("password hashing failed")
        })
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

/// Hash on the blocking pool
pub async fn hash_password(
    hasher: Arc<dyn PasswordHasher>,
    plaintext: String,
) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
}

/// Verify on the blocking pool
pub async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    plaintext: String,
    hash: String,
) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("verification task failed: {}", e)))
}
