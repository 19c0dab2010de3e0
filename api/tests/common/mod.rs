//! Shared setup for the API integration tests
#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use cm_api::app::AppState;
use cm_core::{
    AuthService, BcryptHasher, CourseService, MockCourseRepository, MockCredentialStore,
    PasswordHasher, TokenService, TokenServiceConfig,
};

pub const TEST_SECRET: &str = "test-secret";

pub type TestState = AppState<MockCredentialStore, MockCourseRepository>;

/// State backed by the in-memory stores, with the cheapest bcrypt cost
pub fn test_state() -> TestState {
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(4));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new(TEST_SECRET)).unwrap());
    let auth_service =
        AuthService::new(Arc::new(MockCredentialStore::new()), hasher, tokens).unwrap();
    let course_service = CourseService::new(Arc::new(MockCourseRepository::new()));

    AppState::new(Arc::new(auth_service), Arc::new(course_service))
}

/// Builds the full application around `state`
macro_rules! init_app {
    ($state:expr) => {{
        let state = $state.clone();
        actix_web::test::init_service(
            actix_web::App::new().configure(move |cfg| cm_api::app::configure(cfg, &state)),
        )
        .await
    }};
}

/// Sends a request and returns `(status, json body)`
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        let json: serde_json::Value = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }};
}

/// Signs up an account and returns its token
macro_rules! signup {
    ($app:expr, $role:expr, $username:expr, $password:expr) => {{
        let (status, body) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri(&format!("/{}/signup", $role))
                .set_json(serde_json::json!({ "username": $username, "password": $password }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }};
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
