//! Unit tests for the in-memory credential store

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::identity::Role;
use crate::errors::{AuthError, DomainError};
use crate::repositories::credential::{CredentialStore, MockCredentialStore};

#[tokio::test]
async fn test_create_and_find() {
    let store = MockCredentialStore::new();

    let created = store.create(Role::Teacher, "bob", "hash").await.unwrap();
    assert_eq!(created.role, Role::Teacher);

    let by_name = store.find_by_username(Role::Teacher, "bob").await.unwrap();
    assert_eq!(by_name.unwrap().id, created.id);

    let by_id = store.find_by_id(Role::Teacher, created.id).await.unwrap();
    assert_eq!(by_id.unwrap().username, "bob");
}

#[tokio::test]
async fn test_roles_are_separate_spaces() {
    let store = MockCredentialStore::new();

    let teacher = store.create(Role::Teacher, "alice", "h1").await.unwrap();
    let student = store.create(Role::Student, "alice", "h2").await.unwrap();
    assert_ne!(teacher.id, student.id);

    // An id from one space never resolves in the other
    assert!(store.find_by_id(Role::Student, teacher.id).await.unwrap().is_none());
    assert_eq!(store.count(Role::Teacher).await, 1);
    assert_eq!(store.count(Role::Student).await, 1);
}

#[tokio::test]
async fn test_duplicate_username_within_role() {
    let store = MockCredentialStore::new();
    store.create(Role::Student, "carol", "h").await.unwrap();

    let result = store.create(Role::Student, "carol", "other").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateUsername { role: Role::Student }))
    ));
    assert_eq!(store.count(Role::Student).await, 1);
}

#[tokio::test]
async fn test_concurrent_signups_yield_one_account() {
    let store = Arc::new(MockCredentialStore::new());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create(Role::Teacher, "race", "h").await.is_ok()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(store.count(Role::Teacher).await, 1);
}

#[tokio::test]
async fn test_update_password_hash() {
    let store = MockCredentialStore::new();
    let created = store.create(Role::Teacher, "dave", "old").await.unwrap();

    let updated = store
        .update_password_hash(Role::Teacher, created.id, "new")
        .await
        .unwrap();
    assert_eq!(updated.password_hash, "new");

    let missing = store
        .update_password_hash(Role::Teacher, Uuid::new_v4(), "x")
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_unavailable_store_fails_internally() {
    let store = MockCredentialStore::new();
    store.set_unavailable(true);

    let result = store.find_by_username(Role::Teacher, "bob").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
