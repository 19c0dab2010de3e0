//! Integration tests for JWT authentication middleware

#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, test::TestRequest, web, App, HttpResponse};
use serde_json::json;

use cm_api::middleware::auth::{AuthContext, JwtAuth};
use cm_core::{BearerAuthenticator, Identity, Role, TokenService, TokenServiceConfig};

use common::{bearer, test_state};

#[actix_web::test]
async fn test_missing_token_is_unauthenticated() {
    let app = init_app!(test_state());

    let (status, body) = send!(app, TestRequest::get().uri("/teacher/courses"));

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[actix_web::test]
async fn test_garbage_token_is_invalid() {
    let app = init_app!(test_state());

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri("/student/me")
            .insert_header(bearer("invalid-token"))
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_is_invalid() {
    let state = test_state();
    let app = init_app!(state);
    signup!(app, "teacher", "bob", "pw123");

    let foreign = TokenService::new(TokenServiceConfig::new("some-other-secret")).unwrap();
    let token = foreign
        .issue(&Identity::new(Role::Teacher, "bob", "hash"))
        .unwrap();

    let (status, body) = send!(
        app,
        TestRequest::get().uri("/teacher/me").insert_header(bearer(&token))
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_token_for_unknown_account_is_unauthenticated() {
    let state = test_state();
    let app = init_app!(state);

    // Correctly signed, but the subject was never stored
    let ghost = Identity::new(Role::Teacher, "ghost", "hash");
    let token = state.auth_service.token_service().issue(&ghost).unwrap();

    let (status, body) = send!(
        app,
        TestRequest::get().uri("/teacher/me").insert_header(bearer(&token))
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[actix_web::test]
async fn test_lowercase_bearer_scheme_is_accepted() {
    let app = init_app!(test_state());
    let token = signup!(app, "teacher", "bob", "pw123");

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri("/teacher/me")
            .insert_header(("Authorization", format!("bearer {}", token)))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");
}

#[actix_web::test]
async fn test_student_token_rejected_on_teacher_routes() {
    let app = init_app!(test_state());
    let token = signup!(app, "student", "alice", "pw123");

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/teacher/addcourse")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "t", "description": "d", "price": 10.0 }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, _) = send!(
        app,
        TestRequest::get().uri("/teacher/me").insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_teacher_token_rejected_on_student_routes() {
    let app = init_app!(test_state());
    let token = signup!(app, "teacher", "bob", "pw123");

    let (status, _) = send!(
        app,
        TestRequest::get()
            .uri("/student/purchasedCourses")
            .insert_header(bearer(&token))
    );

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_auth_context_extractor() {
    async fn protected_handler(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().json(json!({
            "username": auth.username,
            "role": auth.role,
        }))
    }

    let state = test_state();
    let token = state
        .auth_service
        .signup(Role::Student, "alice", "pw123")
        .await
        .unwrap()
        .token;

    let authenticator: Arc<dyn BearerAuthenticator> = state.auth_service.clone();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(authenticator))
            .service(
                web::resource("/protected")
                    .wrap(JwtAuth::require(Role::Student))
                    .route(web::get().to(protected_handler)),
            ),
    )
    .await;

    let (status, body) = send!(
        app,
        TestRequest::get().uri("/protected").insert_header(bearer(&token))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "username": "alice", "role": "student" }));
}

#[actix_web::test]
async fn test_extractor_without_middleware_is_unauthenticated() {
    async fn protected_handler(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().body(auth.username)
    }

    let app =
        test::init_service(App::new().route("/unguarded", web::get().to(protected_handler))).await;

    let (status, body) = send!(app, TestRequest::get().uri("/unguarded"));

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHENTICATED");
}
