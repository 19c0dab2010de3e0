//! # OpenLogic Core
//!
//! Core business logic and domain layer for the OpenLogic backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Course, CourseDraft, CourseUpdate, Identity, Principal, Role};
pub use domain::value_objects::AuthResponse;
pub use errors::{
    AuthError, CourseError, DomainError, DomainResult, TokenError, ValidationError,
};
pub use repositories::{
    CourseRepository, CredentialStore, MockCourseRepository, MockCredentialStore,
};
pub use services::{
    AuthService, BcryptHasher, BearerAuthenticator, CourseService, PasswordHasher, TokenService,
    TokenServiceConfig,
};
