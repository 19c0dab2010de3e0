pub mod course;
pub mod credential;

pub use course::{CourseRepository, MockCourseRepository};
pub use credential::{CredentialStore, MockCredentialStore};
