//! In-memory implementation of CourseRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::course::{Course, CourseUpdate};
use crate::errors::{CourseError, DomainError};

use super::trait_::CourseRepository;

#[derive(Default)]
struct State {
    courses: HashMap<Uuid, Course>,
    // Insertion order is kept so purchased lists come back in purchase order
    purchases: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory course and purchase store
pub struct MockCourseRepository {
    state: Arc<RwLock<State>>,
}

impl MockCourseRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

impl Default for MockCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_creation(mut courses: Vec<Course>) -> Vec<Course> {
    courses.sort_by_key(|c| c.created_at);
    courses
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn create(&self, course: Course) -> Result<Course, DomainError> {
        let mut state = self.state.write().await;
        state.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError> {
        let state = self.state.read().await;
        Ok(state.courses.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Course>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_creation(
            state
                .courses
                .values()
                .filter(|c| c.is_owned_by(owner_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_published(&self) -> Result<Vec<Course>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_creation(
            state.courses.values().filter(|c| c.published).cloned().collect(),
        ))
    }

    async fn update_if_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: CourseUpdate,
    ) -> Result<Option<Course>, DomainError> {
        let mut state = self.state.write().await;
        match state.courses.get_mut(&id) {
            Some(course) if course.is_owned_by(owner_id) => {
                course.apply(update);
                Ok(Some(course.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_if_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Course>, DomainError> {
        let mut state = self.state.write().await;
        let owned = matches!(state.courses.get(&id), Some(c) if c.is_owned_by(owner_id));
        if !owned {
            return Ok(None);
        }

        let removed = state.courses.remove(&id);
        for purchased in state.purchases.values_mut() {
            purchased.retain(|course_id| *course_id != id);
        }
        Ok(removed)
    }

    async fn add_purchase(&self, student_id: Uuid, course_id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if !state.courses.contains_key(&course_id) {
            return Err(CourseError::NotFound.into());
        }
        let purchased = state.purchases.entry(student_id).or_default();
        if purchased.contains(&course_id) {
            return Ok(false);
        }
        purchased.push(course_id);
        Ok(true)
    }

    async fn find_purchased(&self, student_id: Uuid) -> Result<Vec<Course>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .purchases
            .get(&student_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.courses.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}
