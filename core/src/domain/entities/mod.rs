//! Domain entities representing core business objects.

pub mod course;
pub mod identity;
pub mod token;

// Re-export commonly used types
pub use course::{Course, CourseDraft, CourseUpdate};
pub use identity::{Identity, Principal, Role};
pub use token::{Claims, DEFAULT_TOKEN_EXPIRY_SECONDS, JWT_ISSUER};
