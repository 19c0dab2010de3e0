//! Public catalogue and purchases for students.

use actix_web::{web, HttpResponse};

use cm_core::{CourseError, CourseRepository, CredentialStore};

use super::parse_course_id;
use crate::app::AppState;
use crate::dto::course::CoursesResponse;
use crate::dto::MessageResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /student/courses
///
/// Public; lists every published course.
pub async fn published_courses<C, K>(state: web::Data<AppState<C, K>>) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    match state.course_service.published_courses().await {
        Ok(courses) => HttpResponse::Ok().json(CoursesResponse { courses }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /student/purchase/{courseId}
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Course purchased successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Course already purchased
/// - 404 Not Found: Course does not exist
pub async fn purchase<C, K>(
    state: web::Data<AppState<C, K>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let course_id = match parse_course_id(&path, CourseError::NotFound) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(&error),
    };

    match state
        .course_service
        .purchase_course(auth.principal(), course_id)
        .await
    {
        Ok(course) => {
            log::info!("Student {} purchased course {}", auth.user_id, course.id);
            HttpResponse::Ok().json(MessageResponse::new("Course purchased successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /student/purchasedCourses
pub async fn purchased_courses<C, K>(
    state: web::Data<AppState<C, K>>,
    auth: AuthContext,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    match state
        .course_service
        .purchased_courses(auth.principal())
        .await
    {
        Ok(courses) => HttpResponse::Ok().json(CoursesResponse { courses }),
        Err(error) => handle_domain_error(&error),
    }
}
