//! Unit tests for token service

use chrono::Utc;
use cm_shared::config::AppConfig;
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, Role};
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service(secret: &str) -> TokenService {
    TokenService::new(TokenServiceConfig::new(secret)).unwrap()
}

#[test]
fn test_empty_secret_is_rejected() {
    let result = TokenService::new(TokenServiceConfig::new("  "));
    assert!(matches!(result, Err(DomainError::Configuration { .. })));
}

#[test]
fn test_non_positive_lifetime_is_rejected() {
    for ttl in [0, -10] {
        let mut config = TokenServiceConfig::new("test-secret");
        config.token_expiry_seconds = ttl;
        assert!(matches!(
            TokenService::new(config),
            Err(DomainError::Configuration { .. })
        ));
    }
}

#[test]
fn test_overflowing_lifetime_fails_to_issue() {
    let mut config = TokenServiceConfig::new("test-secret");
    config.token_expiry_seconds = i64::MAX;
    let tokens = TokenService::new(config).unwrap();
    let identity = Identity::new(Role::Student, "alice", "hash");

    assert!(matches!(
        tokens.issue(&identity),
        Err(DomainError::Token(TokenError::GenerationFailed))
    ));
}

#[test]
fn test_lifetime_from_environment_is_always_one_hour() {
    let lookup = |key: &str| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "DATABASE_URL" => Some("mysql://localhost/openlogic".to_string()),
        "JWT_EXPIRY_SECONDS" => Some("-10".to_string()),
        _ => None,
    };
    let app_config = AppConfig::from_lookup(lookup).unwrap();
    let tokens = TokenService::new(TokenServiceConfig::from(&app_config.auth.jwt)).unwrap();
    let identity = Identity::new(Role::Teacher, "bob", "hash");

    let claims = tokens.verify(&tokens.issue(&identity).unwrap()).unwrap();
    assert_eq!(tokens.expiry_seconds(), 3600);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_issue_and_verify() {
    let tokens = service("test-secret");
    let identity = Identity::new(Role::Teacher, "bob", "hash");

    let token = tokens.issue(&identity).unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.user_id().unwrap(), identity.id);
    assert_eq!(claims.role, Role::Teacher);
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.iss, "openlogic");
}

#[test]
fn test_expired_token() {
    let tokens = service("test-secret");
    let now = Utc::now().timestamp();
    let claims = Claims::new(Uuid::new_v4(), Role::Student, now - 7200, 3600, "openlogic").unwrap();

    let token = tokens.encode_claims(&claims).unwrap();
    assert!(matches!(
        tokens.verify(&token),
        Err(DomainError::Token(TokenError::Expired))
    ));
}

#[test]
fn test_wrong_secret() {
    let identity = Identity::new(Role::Student, "alice", "hash");
    let token = service("secret-a").issue(&identity).unwrap();

    assert!(matches!(
        service("secret-b").verify(&token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_garbage_token_is_malformed() {
    let tokens = service("test-secret");
    assert!(matches!(
        tokens.verify("not-a-token"),
        Err(DomainError::Token(TokenError::Malformed))
    ));
}

#[test]
fn test_wrong_issuer_is_malformed() {
    let tokens = service("test-secret");
    let now = Utc::now().timestamp();
    let claims = Claims::new(Uuid::new_v4(), Role::Teacher, now, 3600, "someone-else").unwrap();

    let token = tokens.encode_claims(&claims).unwrap();
    assert!(matches!(
        tokens.verify(&token),
        Err(DomainError::Token(TokenError::Malformed))
    ));
}

#[test]
fn test_unknown_role_is_malformed() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now().timestamp();
    let payload = serde_json::json!({
        "sub": Uuid::new_v4().to_string(),
        "role": "admin",
        "iat": now,
        "exp": now + 3600,
        "iss": "openlogic",
    });
    let token = encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    assert!(matches!(
        service("test-secret").verify(&token),
        Err(DomainError::Token(TokenError::Malformed))
    ));
}
