//! MySQL implementation of the CourseRepository trait.
//!
//! Owner-scoped mutations lock the row with `SELECT ... FOR UPDATE` inside
//! a transaction keyed on both id and owner, so an absent course and a
//! course owned by someone else both come back as `None`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use std::time::Duration;
use uuid::Uuid;

use cm_core::domain::entities::course::{Course, CourseUpdate};
use cm_core::errors::{CourseError, DomainError};
use cm_core::repositories::CourseRepository;

use super::{column, db_error, is_foreign_key_violation, is_unique_violation, uuid_column};
use crate::database::timeout::with_timeout;
use crate::database::DatabasePool;

const COURSE_COLUMNS: &str =
    "c.id, c.title, c.description, c.price, c.image_link, c.published, c.owner_id, c.created_at, c.updated_at";

/// MySQL implementation of CourseRepository
pub struct MySqlCourseRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Upper bound for each call
    query_timeout: Duration,
}

impl MySqlCourseRepository {
    /// Create a new MySQL course repository
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Build from a configured pool
    pub fn from_pool(pool: &DatabasePool) -> Self {
        Self::new(pool.get_pool().clone(), pool.query_timeout())
    }

    /// Convert database row to Course entity
    fn row_to_course(row: &MySqlRow) -> Result<Course, DomainError> {
        Ok(Course {
            id: uuid_column(row, "id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            price: column(row, "price")?,
            image_link: column(row, "image_link")?,
            published: column(row, "published")?,
            owner_id: uuid_column(row, "owner_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    fn rows_to_courses(rows: Vec<MySqlRow>) -> Result<Vec<Course>, DomainError> {
        rows.iter().map(Self::row_to_course).collect()
    }
}

#[async_trait]
impl CourseRepository for MySqlCourseRepository {
    async fn create(&self, course: Course) -> Result<Course, DomainError> {
        with_timeout(self.query_timeout, "courses.create", async {
            let query = r#"
                INSERT INTO courses (
                    id, title, description, price, image_link, published,
                    owner_id, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#;

            sqlx::query(query)
                .bind(course.id.to_string())
                .bind(&course.title)
                .bind(&course.description)
                .bind(course.price)
                .bind(&course.image_link)
                .bind(course.published)
                .bind(course.owner_id.to_string())
                .bind(course.created_at)
                .bind(course.updated_at)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to create course", e))?;

            Ok::<_, DomainError>(course)
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError> {
        with_timeout(self.query_timeout, "courses.find_by_id", async {
            let query = format!("SELECT {} FROM courses c WHERE c.id = ? LIMIT 1", COURSE_COLUMNS);

            let row = sqlx::query(&query)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find course", e))?;

            row.map(|r| Self::row_to_course(&r)).transpose()
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Course>, DomainError> {
        with_timeout(self.query_timeout, "courses.find_by_owner", async {
            let query = format!(
                "SELECT {} FROM courses c WHERE c.owner_id = ? ORDER BY c.created_at",
                COURSE_COLUMNS
            );

            let rows = sqlx::query(&query)
                .bind(owner_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list owner courses", e))?;

            Self::rows_to_courses(rows)
        })
        .await
    }

    async fn find_published(&self) -> Result<Vec<Course>, DomainError> {
        with_timeout(self.query_timeout, "courses.find_published", async {
            let query = format!(
                "SELECT {} FROM courses c WHERE c.published = TRUE ORDER BY c.created_at",
                COURSE_COLUMNS
            );

            let rows = sqlx::query(&query)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list published courses", e))?;

            Self::rows_to_courses(rows)
        })
        .await
    }

    async fn update_if_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: CourseUpdate,
    ) -> Result<Option<Course>, DomainError> {
        with_timeout(self.query_timeout, "courses.update_if_owner", async {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| db_error("Failed to begin transaction", e))?;

            let query = format!(
                "SELECT {} FROM courses c WHERE c.id = ? AND c.owner_id = ? FOR UPDATE",
                COURSE_COLUMNS
            );
            let row = sqlx::query(&query)
                .bind(id.to_string())
                .bind(owner_id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to lock course", e))?;

            let Some(row) = row else {
                // Nothing was written; dropping the transaction rolls it back
                return Ok(None);
            };

            let mut course = Self::row_to_course(&row)?;
            course.apply(update);

            sqlx::query(
                r#"
                UPDATE courses
                SET title = ?, description = ?, price = ?, image_link = ?,
                    published = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&course.title)
            .bind(&course.description)
            .bind(course.price)
            .bind(&course.image_link)
            .bind(course.published)
            .bind(course.updated_at)
            .bind(course.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update course", e))?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit course update", e))?;

            Ok::<_, DomainError>(Some(course))
        })
        .await
    }

    async fn delete_if_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Course>, DomainError> {
        with_timeout(self.query_timeout, "courses.delete_if_owner", async {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| db_error("Failed to begin transaction", e))?;

            let query = format!(
                "SELECT {} FROM courses c WHERE c.id = ? AND c.owner_id = ? FOR UPDATE",
                COURSE_COLUMNS
            );
            let row = sqlx::query(&query)
                .bind(id.to_string())
                .bind(owner_id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to lock course", e))?;

            let Some(row) = row else {
                return Ok(None);
            };
            let course = Self::row_to_course(&row)?;

            // student_purchases rows go with it through ON DELETE CASCADE
            sqlx::query("DELETE FROM courses WHERE id = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete course", e))?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit course delete", e))?;

            Ok::<_, DomainError>(Some(course))
        })
        .await
    }

    async fn add_purchase(&self, student_id: Uuid, course_id: Uuid) -> Result<bool, DomainError> {
        with_timeout(self.query_timeout, "courses.add_purchase", async {
            let result = sqlx::query(
                "INSERT INTO student_purchases (student_id, course_id, purchased_at) VALUES (?, ?, ?)",
            )
            .bind(student_id.to_string())
            .bind(course_id.to_string())
            .bind(Utc::now())
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => Ok(true),
                Err(e) if is_unique_violation(&e) => Ok(false),
                // The course was deleted after the caller looked it up
                Err(e) if is_foreign_key_violation(&e) => Err(CourseError::NotFound.into()),
                Err(e) => Err(db_error("Failed to record purchase", e)),
            }
        })
        .await
    }

    async fn find_purchased(&self, student_id: Uuid) -> Result<Vec<Course>, DomainError> {
        with_timeout(self.query_timeout, "courses.find_purchased", async {
            let query = format!(
                "SELECT {} FROM student_purchases p JOIN courses c ON c.id = p.course_id \
                 WHERE p.student_id = ? ORDER BY p.id",
                COURSE_COLUMNS
            );

            let rows = sqlx::query(&query)
                .bind(student_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list purchased courses", e))?;

            Self::rows_to_courses(rows)
        })
        .await
    }
}
