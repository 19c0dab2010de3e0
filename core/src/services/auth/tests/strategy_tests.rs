//! Unit tests for the authentication strategies

use crate::domain::entities::identity::Role;
use crate::errors::{AuthError, DomainError};
use crate::repositories::MockCredentialStore;
use crate::services::auth::LocalStrategy;

use super::test_service;

#[test]
fn test_strategy_names() {
    assert_eq!(LocalStrategy::<MockCredentialStore>::name_for(Role::Teacher), "teacher-local");
    assert_eq!(LocalStrategy::<MockCredentialStore>::name_for(Role::Student), "student-local");
}

#[tokio::test]
async fn test_strategy_lookup_by_name() {
    let (service, _) = test_service();

    assert_eq!(service.strategy("teacher-local").unwrap().role(), Role::Teacher);
    assert_eq!(service.strategy("student-local").unwrap().role(), Role::Student);
    assert!(service.strategy("jwt").is_none());
}

#[tokio::test]
async fn test_local_strategy_is_scoped_to_role() {
    let (service, _) = test_service();
    service.signup(Role::Student, "grace", "pw").await.unwrap();

    let student = service
        .local_strategy(Role::Student)
        .authenticate("grace", "pw")
        .await
        .unwrap();
    assert_eq!(student.role, Role::Student);

    let as_teacher = service
        .local_strategy(Role::Teacher)
        .authenticate("grace", "pw")
        .await;
    assert!(matches!(
        as_teacher,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_look_the_same() {
    let (service, _) = test_service();
    service.signup(Role::Teacher, "heidi", "pw").await.unwrap();
    let strategy = service.strategy("teacher-local").unwrap();

    let unknown = strategy.authenticate("nobody", "pw").await.unwrap_err();
    let wrong = strategy.authenticate("heidi", "bad").await.unwrap_err();
    assert_eq!(unknown.to_string(), wrong.to_string());
}
