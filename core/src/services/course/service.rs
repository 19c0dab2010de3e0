//! Course service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::course::{Course, CourseDraft, CourseUpdate};
use crate::domain::entities::identity::{Principal, Role};
use crate::errors::{AuthError, CourseError, DomainResult};
use crate::repositories::CourseRepository;

/// Course rules on top of a course repository
///
/// Mutations scoped to an owner report a missing course and a course owned
/// by someone else with the same `NotFoundOrUnauthorized` error.
pub struct CourseService<K: CourseRepository> {
    repository: Arc<K>,
}

impl<K: CourseRepository> CourseService<K> {
    pub fn new(repository: Arc<K>) -> Self {
        Self { repository }
    }

    /// Create a course owned by the calling teacher
    pub async fn create_course(&self, principal: Principal, draft: CourseDraft) -> DomainResult<Course> {
        require_role(principal, Role::Teacher)?;

        let course = Course::from_draft(principal.id, draft)?;
        let course = self.repository.create(course).await?;

        tracing::info!(course_id = %course.id, owner_id = %principal.id, "Course created");
        Ok(course)
    }

    /// Every course the calling teacher created
    pub async fn courses_by_owner(&self, principal: Principal) -> DomainResult<Vec<Course>> {
        require_role(principal, Role::Teacher)?;
        self.repository.find_by_owner(principal.id).await
    }

    /// Partially update a course the caller owns
    pub async fn update_course(
        &self,
        principal: Principal,
        course_id: Uuid,
        update: CourseUpdate,
    ) -> DomainResult<Course> {
        update.validate()?;
        if !principal.is_teacher() {
            return Err(CourseError::NotFoundOrUnauthorized.into());
        }

        let updated = self
            .repository
            .update_if_owner(course_id, principal.id, update)
            .await?;

        match updated {
            Some(course) => {
                tracing::info!(course_id = %course.id, "Course updated");
                Ok(course)
            }
            None => {
                tracing::info!(course_id = %course_id, requester = %principal.id, "Course not found or unauthorized");
                Err(CourseError::NotFoundOrUnauthorized.into())
            }
        }
    }

    /// Delete a course the caller owns
    pub async fn delete_course(&self, principal: Principal, course_id: Uuid) -> DomainResult<Course> {
        if !principal.is_teacher() {
            return Err(CourseError::NotFoundOrUnauthorized.into());
        }

        match self.repository.delete_if_owner(course_id, principal.id).await? {
            Some(course) => {
                tracing::info!(course_id = %course.id, "Course deleted");
                Ok(course)
            }
            None => {
                tracing::info!(course_id = %course_id, requester = %principal.id, "Course not found or unauthorized");
                Err(CourseError::NotFoundOrUnauthorized.into())
            }
        }
    }

    /// Public catalogue
    pub async fn published_courses(&self) -> DomainResult<Vec<Course>> {
        self.repository.find_published().await
    }

    /// Add a course to the calling student's purchases
    ///
    /// # Returns
    ///
    /// * `Ok(Course)` - The purchased course
    /// * `Err(CourseError::NotFound)` - No such course
    /// * `Err(CourseError::AlreadyPurchased)` - Already owned; nothing changes
    pub async fn purchase_course(&self, principal: Principal, course_id: Uuid) -> DomainResult<Course> {
        require_role(principal, Role::Student)?;

        let course = self
            .repository
            .find_by_id(course_id)
            .await?
            .ok_or(CourseError::NotFound)?;

        if !self.repository.add_purchase(principal.id, course.id).await? {
            return Err(CourseError::AlreadyPurchased.into());
        }

        tracing::info!(course_id = %course.id, student_id = %principal.id, "Course purchased");
        Ok(course)
    }

    /// Courses the calling student purchased, in purchase order
    pub async fn purchased_courses(&self, principal: Principal) -> DomainResult<Vec<Course>> {
        require_role(principal, Role::Student)?;
        self.repository.find_purchased(principal.id).await
    }
}

fn require_role(principal: Principal, required: Role) -> Result<(), AuthError> {
    if principal.role != required {
        return Err(AuthError::Forbidden { required });
    }
    Ok(())
}
