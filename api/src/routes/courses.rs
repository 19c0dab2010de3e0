//! Course management for teachers.

use actix_web::{web, HttpResponse};
use validator::Validate;

use cm_core::{CourseDraft, CourseError, CourseRepository, CourseUpdate, CredentialStore, DomainError};

use super::parse_course_id;
use crate::app::AppState;
use crate::dto::course::{CourseResponse, CoursesResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::dto::{into_validation_error, MessageResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /teacher/addcourse
///
/// # Request Body
///
/// ```json
/// {
///     "title": "Rust 101",
///     "description": "Ownership from first principles",
///     "price": 49.0,
///     "imageLink": "https://cdn.example/rust.png",
///     "published": true
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "message": "Course created successfully",
///     "course": { "id": "...", "title": "Rust 101", ... }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: title, description or price missing
pub async fn add_course<C, K>(
    state: web::Data<AppState<C, K>>,
    auth: AuthContext,
    request: web::Json<CreateCourseRequest>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&DomainError::from(into_validation_error(&errors)));
    }

    let draft = CourseDraft::from(request.into_inner());
    match state
        .course_service
        .create_course(auth.principal(), draft)
        .await
    {
        Ok(course) => HttpResponse::Created().json(CourseResponse {
            message: "Course created successfully".to_string(),
            course,
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /teacher/courses
///
/// Lists every course the authenticated teacher owns, published or not.
pub async fn own_courses<C, K>(state: web::Data<AppState<C, K>>, auth: AuthContext) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    match state.course_service.courses_by_owner(auth.principal()).await {
        Ok(courses) => HttpResponse::Ok().json(CoursesResponse { courses }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /teacher/course/{id}
///
/// ## Errors
/// - 400 Bad Request: A provided field is blank or the price is not positive
/// - 404 Not Found: The course does not exist or belongs to another teacher
pub async fn update_course<C, K>(
    state: web::Data<AppState<C, K>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateCourseRequest>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&DomainError::from(into_validation_error(&errors)));
    }

    let course_id = match parse_course_id(&path, CourseError::NotFoundOrUnauthorized) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(&error),
    };

    let update = CourseUpdate::from(request.into_inner());
    match state
        .course_service
        .update_course(auth.principal(), course_id, update)
        .await
    {
        Ok(course) => HttpResponse::Ok().json(CourseResponse {
            message: "Course updated successfully".to_string(),
            course,
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /teacher/course/{id}
///
/// Deleting a course also removes it from every student's purchases.
///
/// ## Errors
/// - 404 Not Found: The course does not exist or belongs to another teacher
pub async fn delete_course<C, K>(
    state: web::Data<AppState<C, K>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let course_id = match parse_course_id(&path, CourseError::NotFoundOrUnauthorized) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(&error),
    };

    match state
        .course_service
        .delete_course(auth.principal(), course_id)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("Course deleted successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
