//! Tests for authentication service

mod strategy_tests;

use std::sync::Arc;

use crate::repositories::MockCredentialStore;
use crate::services::auth::AuthService;
use crate::services::password::{BcryptHasher, PasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Service over an empty in-memory store with the cheapest bcrypt cost
pub(super) fn test_service() -> (AuthService<MockCredentialStore>, Arc<MockCredentialStore>) {
    let store = Arc::new(MockCredentialStore::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(4));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("test-secret")).unwrap());

    let service = AuthService::new(store.clone(), hasher, tokens).unwrap();
    (service, store)
}
