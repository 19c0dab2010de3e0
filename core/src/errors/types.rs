//! Error types for authentication, token handling, course access and validation

use thiserror::Error;

use crate::domain::entities::identity::Role;

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username already exists for {role}")]
    DuplicateUsername { role: Role },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    /// Token was valid but its subject no longer resolves to an account
    #[error("Token subject not found")]
    UnknownSubject,

    #[error("This action requires the {required} role")]
    Forbidden { required: Role },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Course access errors
#[derive(Error, Debug)]
pub enum CourseError {
    /// Absent and not-owned are deliberately indistinguishable on mutation
    #[error("Course not found or unauthorized")]
    NotFoundOrUnauthorized,

    #[error("Course not found")]
    NotFound,

    #[error("Course already purchased")]
    AlreadyPurchased,
}

/// Validation errors
///
/// These errors represent input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} ({reason})")]
    OutOfRange { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}
