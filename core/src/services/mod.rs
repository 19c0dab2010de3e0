//! Business services containing domain logic and use cases.

pub mod auth;
pub mod course;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, BearerAuthenticator, BearerStrategy, LocalStrategy};
pub use course::CourseService;
pub use password::{BcryptHasher, PasswordHasher};
pub use token::{TokenService, TokenServiceConfig};
