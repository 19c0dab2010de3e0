//! Maps domain errors onto HTTP responses.
//!
//! Every handler and the authentication middleware funnel their failures
//! through [`handle_domain_error`], so the status code and body shape for a
//! given error are decided in one place.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use cm_core::errors::{AuthError, CourseError, DomainError, TokenError, ValidationError};
use cm_shared::errors::{error_codes, ErrorResponse};

/// Fields whose absence is reported with the account wording
const CREDENTIAL_FIELDS: [&str; 2] = ["username", "password"];

/// Convert a domain error into the JSON error response for it
///
/// Internal failures are logged here and answered with a generic message.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, body) = error_response(error);
    HttpResponse::build(status).json(body)
}

/// Status code and body for a domain error
pub fn error_response(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::ValidationErr(validation) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_message(validation))
                .add_detail("field", validation.field()),
        ),

        DomainError::Auth(auth) => match auth {
            AuthError::DuplicateUsername { role } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    error_codes::DUPLICATE_USERNAME,
                    format!("{} already exists", role.display_name()),
                ),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid credentials"),
            ),
            AuthError::Unauthenticated | AuthError::UnknownSubject => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::UNAUTHENTICATED, "Authentication required"),
            ),
            AuthError::Forbidden { required } => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(error_codes::FORBIDDEN, auth.to_string())
                    .add_detail("requiredRole", required.as_str()),
            ),
        },

        DomainError::Token(TokenError::GenerationFailed) => internal_error(error),
        DomainError::Token(_) => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::INVALID_TOKEN, "Invalid or expired token"),
        ),

        DomainError::Course(course) => {
            let code = match course {
                CourseError::NotFoundOrUnauthorized => error_codes::NOT_FOUND_OR_UNAUTHORIZED,
                CourseError::NotFound => error_codes::NOT_FOUND,
                CourseError::AlreadyPurchased => error_codes::ALREADY_PURCHASED,
            };
            let status = match course {
                CourseError::AlreadyPurchased => StatusCode::BAD_REQUEST,
                _ => StatusCode::NOT_FOUND,
            };
            (status, ErrorResponse::new(code, course.to_string()))
        }

        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),

        DomainError::Internal { .. } | DomainError::Configuration { .. } => internal_error(error),
    }
}

fn internal_error(error: &DomainError) -> (StatusCode, ErrorResponse) {
    log::error!("Request failed: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error"),
    )
}

fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::RequiredField { field } if CREDENTIAL_FIELDS.contains(&field.as_str()) => {
            "Username and password are required".to_string()
        }
        ValidationError::RequiredField { .. } => "All fields are required".to_string(),
        other => other.to_string(),
    }
}

/// Error handler for malformed or non-JSON request bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
            .add_detail("reason", err.to_string()),
    );
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::Role;

    #[test]
    fn test_duplicate_username_is_conflict() {
        let error = DomainError::from(AuthError::DuplicateUsername {
            role: Role::Teacher,
        });
        let (status, body) = error_response(&error);

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error, error_codes::DUPLICATE_USERNAME);
        assert_eq!(body.message, "Teacher already exists");
    }

    #[test]
    fn test_missing_credentials_message() {
        let error = DomainError::from(ValidationError::RequiredField {
            field: "password".to_string(),
        });
        let (status, body) = error_response(&error);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Username and password are required");
    }

    #[test]
    fn test_missing_course_field_message() {
        let error = DomainError::from(ValidationError::RequiredField {
            field: "title".to_string(),
        });
        let (_, body) = error_response(&error);
        assert_eq!(body.message, "All fields are required");
        assert_eq!(body.details.unwrap()["field"], "title");
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        for error in [TokenError::Expired, TokenError::InvalidSignature, TokenError::Malformed] {
            let (status, body) = error_response(&DomainError::from(error));
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body.error, error_codes::INVALID_TOKEN);
        }
    }

    #[test]
    fn test_course_errors() {
        let (status, body) = error_response(&CourseError::NotFoundOrUnauthorized.into());
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Course not found or unauthorized");

        let (status, body) = error_response(&CourseError::AlreadyPurchased.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Course already purchased");

        let (status, body) = error_response(&CourseError::NotFound.into());
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Course not found");
    }

    #[test]
    fn test_forbidden_role() {
        let error = DomainError::from(AuthError::Forbidden {
            required: Role::Student,
        });
        let (status, body) = error_response(&error);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, error_codes::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let error = DomainError::internal("connection refused by 10.0.0.3");
        let (status, body) = error_response(&error);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_missing_account_is_not_found() {
        let error = DomainError::NotFound {
            resource: "Student".to_string(),
        };
        let (status, body) = error_response(&error);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Student not found");
    }
}
