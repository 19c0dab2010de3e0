//! Route handlers grouped by resource

pub mod account;
pub mod courses;
pub mod health;
pub mod purchases;

use uuid::Uuid;

use cm_core::{CourseError, DomainError};

/// Parses a course id from the path
///
/// An unparseable id cannot name an existing course, so it is reported with
/// the same error the lookup itself would produce.
pub(crate) fn parse_course_id(raw: &str, not_found: CourseError) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::from(not_found))
}
