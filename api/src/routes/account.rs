//! Signup, login and account maintenance for both roles.
//!
//! The handlers are mounted under `/teacher` and `/student`; the scope
//! provides the role as `web::Data<Role>`.

use actix_web::{web, HttpResponse};
use validator::Validate;

use cm_core::{CourseRepository, CredentialStore, DomainError, Role};

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, ChangePasswordRequest, CredentialsRequest, ProfileResponse};
use crate::dto::{into_validation_error, MessageResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /{role}/signup
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "password": "pw123"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "message": "Teacher created successfully",
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "role": "teacher"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Username or password missing
/// - 409 Conflict: Username already taken within the role
pub async fn signup<C, K>(
    state: web::Data<AppState<C, K>>,
    role: web::Data<Role>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&DomainError::from(into_validation_error(&errors)));
    }

    let role = **role;
    match state
        .auth_service
        .signup(role, &request.username, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Created().json(AuthResponse::created(auth)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /{role}/login
///
/// Unknown username and wrong password both answer 401 "Invalid credentials".
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged in successfully",
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "role": "student"
/// }
/// ```
pub async fn login<C, K>(
    state: web::Data<AppState<C, K>>,
    role: web::Data<Role>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let role = **role;
    match state
        .auth_service
        .login(role, &request.username, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(AuthResponse::logged_in(auth)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /{role}/me
///
/// Returns `{ "username": "alice" }` for the authenticated account.
pub async fn me<C, K>(state: web::Data<AppState<C, K>>, auth: AuthContext) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    match state.auth_service.profile(auth.role, auth.user_id).await {
        Ok(identity) => HttpResponse::Ok().json(ProfileResponse {
            username: identity.username,
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /{role}/password
///
/// # Request Body
///
/// ```json
/// {
///     "currentPassword": "pw123",
///     "newPassword": "pw456"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: New password missing
/// - 401 Unauthorized: Current password does not match
pub async fn change_password<C, K>(
    state: web::Data<AppState<C, K>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&DomainError::from(into_validation_error(&errors)));
    }

    match state
        .auth_service
        .change_password(
            auth.role,
            auth.user_id,
            &request.current_password,
            &request.new_password,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
