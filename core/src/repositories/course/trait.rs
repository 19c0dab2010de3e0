//! Course repository trait covering courses and student purchases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::course::{Course, CourseUpdate};
use crate::errors::DomainError;

/// Repository trait for courses and the purchase set of each student
///
/// Ownership-scoped mutations are single operations keyed on both the
/// course id and the owner id, so an absent course and a course owned by
/// someone else produce the same `None`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course
    async fn create(&self, course: Course) -> Result<Course, DomainError>;

    /// Find a course by id regardless of owner
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError>;

    /// All courses created by a teacher
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Course>, DomainError>;

    /// All courses with `published == true`
    async fn find_published(&self) -> Result<Vec<Course>, DomainError>;

    /// Apply a partial update if the course exists and belongs to `owner_id`
    ///
    /// # Returns
    /// * `Ok(Some(Course))` - The updated course
    /// * `Ok(None)` - Course absent or owned by another teacher
    async fn update_if_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: CourseUpdate,
    ) -> Result<Option<Course>, DomainError>;

    /// Delete the course if it exists and belongs to `owner_id`
    ///
    /// Purchases referencing the course are removed with it.
    async fn delete_if_owner(&self, id: Uuid, owner_id: Uuid)
        -> Result<Option<Course>, DomainError>;

    /// Add a course to a student's purchase set
    ///
    /// # Returns
    /// * `Ok(true)` - Purchase recorded
    /// * `Ok(false)` - Student already owns the course; set unchanged
    /// * `Err(CourseError::NotFound)` - Course no longer exists
    async fn add_purchase(&self, student_id: Uuid, course_id: Uuid) -> Result<bool, DomainError>;

    /// Courses purchased by a student, in purchase order
    async fn find_purchased(&self, student_id: Uuid) -> Result<Vec<Course>, DomainError>;
}
