//! Application state and route configuration
//!
//! [`configure`] registers the shared state and every route. The binary and
//! the integration tests build their `App` around it, so both serve exactly
//! the same routes.

use std::sync::Arc;

use actix_web::web;

use cm_core::{
    AuthService, BearerAuthenticator, CourseRepository, CourseService, CredentialStore, Role,
};

use crate::handlers::error::json_error_handler;
use crate::middleware::auth::JwtAuth;
use crate::routes::{account, courses, health, purchases};

/// Services shared by every worker
pub struct AppState<C: CredentialStore, K: CourseRepository> {
    pub auth_service: Arc<AuthService<C>>,
    pub course_service: Arc<CourseService<K>>,
}

impl<C: CredentialStore, K: CourseRepository> AppState<C, K> {
    pub fn new(auth_service: Arc<AuthService<C>>, course_service: Arc<CourseService<K>>) -> Self {
        Self {
            auth_service,
            course_service,
        }
    }
}

impl<C: CredentialStore, K: CourseRepository> Clone for AppState<C, K> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            course_service: Arc::clone(&self.course_service),
        }
    }
}

/// Register app data and all routes
pub fn configure<C, K>(cfg: &mut web::ServiceConfig, state: &AppState<C, K>)
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let authenticator: Arc<dyn BearerAuthenticator> = state.auth_service.clone();

    cfg.app_data(web::Data::new(state.clone()))
        .app_data(web::Data::from(authenticator))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health))
        .service(teacher_scope::<C, K>())
        .service(student_scope::<C, K>());
}

fn teacher_scope<C, K>() -> actix_web::Scope
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let role = Role::Teacher;

    web::scope("/teacher")
        .app_data(web::Data::new(role))
        .route("/signup", web::post().to(account::signup::<C, K>))
        .route("/login", web::post().to(account::login::<C, K>))
        .service(
            web::resource("/me")
                .wrap(JwtAuth::require(role))
                .route(web::get().to(account::me::<C, K>)),
        )
        .service(
            web::resource("/password")
                .wrap(JwtAuth::require(role))
                .route(web::put().to(account::change_password::<C, K>)),
        )
        .service(
            web::resource("/addcourse")
                .wrap(JwtAuth::require(role))
                .route(web::post().to(courses::add_course::<C, K>)),
        )
        .service(
            web::resource("/courses")
                .wrap(JwtAuth::require(role))
                .route(web::get().to(courses::own_courses::<C, K>)),
        )
        .service(
            web::resource("/course/{id}")
                .wrap(JwtAuth::require(role))
                .route(web::put().to(courses::update_course::<C, K>))
                .route(web::delete().to(courses::delete_course::<C, K>)),
        )
}

fn student_scope<C, K>() -> actix_web::Scope
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let role = Role::Student;

    web::scope("/student")
        .app_data(web::Data::new(role))
        .route("/signup", web::post().to(account::signup::<C, K>))
        .route("/login", web::post().to(account::login::<C, K>))
        .route("/courses", web::get().to(purchases::published_courses::<C, K>))
        .service(
            web::resource("/me")
                .wrap(JwtAuth::require(role))
                .route(web::get().to(account::me::<C, K>)),
        )
        .service(
            web::resource("/password")
                .wrap(JwtAuth::require(role))
                .route(web::put().to(account::change_password::<C, K>)),
        )
        .service(
            web::resource("/purchase/{course_id}")
                .wrap(JwtAuth::require(role))
                .route(web::post().to(purchases::purchase::<C, K>)),
        )
        .service(
            web::resource("/purchasedCourses")
                .wrap(JwtAuth::require(role))
                .route(web::get().to(purchases::purchased_courses::<C, K>)),
        )
}
