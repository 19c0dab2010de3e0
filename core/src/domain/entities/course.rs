//! Course entity and the inputs used to create and edit it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// A course authored by exactly one teacher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier for the course
    pub id: Uuid,

    pub title: String,

    pub description: String,

    /// Price, always strictly positive
    pub price: f64,

    /// Optional cover image URL
    pub image_link: Option<String>,

    /// Whether the course appears in the public catalogue
    pub published: bool,

    /// Id of the owning teacher
    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Builds a course from a validated draft
    pub fn from_draft(owner_id: Uuid, draft: CourseDraft) -> Result<Self, ValidationError> {
        draft.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            // validate() guarantees the price is present
            price: draft.price.unwrap_or_default(),
            image_link: draft.image_link.filter(|link| !link.trim().is_empty()),
            published: draft.published.unwrap_or(false),
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks if the given teacher owns this course
    pub fn is_owned_by(&self, owner_id: Uuid) -> bool {
        self.owner_id == owner_id
    }

    /// Applies a validated partial update
    pub fn apply(&mut self, update: CourseUpdate) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image_link) = update.image_link {
            self.image_link = Some(image_link).filter(|link| !link.trim().is_empty());
        }
        if let Some(published) = update.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a course
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub image_link: Option<String>,
    pub published: Option<bool>,
}

impl CourseDraft {
    /// Title, description and a positive price are all required.
    /// A zero price counts as missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "title".to_string(),
            });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "description".to_string(),
            });
        }
        match self.price {
            None => Err(ValidationError::RequiredField {
                field: "price".to_string(),
            }),
            Some(price) if price == 0.0 => Err(ValidationError::RequiredField {
                field: "price".to_string(),
            }),
            Some(price) => validate_price(price),
        }
    }
}

/// Partial update for a course; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_link: Option<String>,
    pub published: Option<bool>,
}

impl CourseUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(ValidationError::RequiredField {
                field: "title".to_string(),
            });
        }
        if matches!(&self.description, Some(description) if description.trim().is_empty()) {
            return Err(ValidationError::RequiredField {
                field: "description".to_string(),
            });
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            reason: "must be a positive number".to_string(),
        });
    }
    Ok(())
}
