use serde::{Deserialize, Serialize};
use validator::Validate;

use cm_core::{Course, CourseDraft, CourseUpdate};

/// Request body for `POST /teacher/addcourse`
///
/// Required fields are optional here so that a missing field surfaces as a
/// domain validation error instead of a deserialization failure.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub price: Option<f64>,

    #[validate(length(max = 2048))]
    pub image_link: Option<String>,

    pub published: Option<bool>,
}

impl From<CreateCourseRequest> for CourseDraft {
    fn from(request: CreateCourseRequest) -> Self {
        CourseDraft {
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            price: request.price,
            image_link: request.image_link,
            published: request.published,
        }
    }
}

/// Request body for `PUT /teacher/course/{id}`; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[validate(length(max = 2048))]
    pub image_link: Option<String>,
    pub published: Option<bool>,
}

impl From<UpdateCourseRequest> for CourseUpdate {
    fn from(request: UpdateCourseRequest) -> Self {
        CourseUpdate {
            title: request.title,
            description: request.description,
            price: request.price,
            image_link: request.image_link,
            published: request.published,
        }
    }
}

/// A single course with a confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseResponse {
    pub message: String,
    pub course: Course,
}

/// A list of courses
#[derive(Debug, Serialize, Deserialize)]
pub struct CoursesResponse {
    pub courses: Vec<Course>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_into_draft() {
        let request: CreateCourseRequest = serde_json::from_str(
            r#"{"title":"Rust 101","description":"Ownership","price":49.0,"imageLink":"https://img/1.png"}"#,
        )
        .unwrap();
        let draft = CourseDraft::from(request);

        assert_eq!(draft.title, "Rust 101");
        assert_eq!(draft.price, Some(49.0));
        assert_eq!(draft.image_link.as_deref(), Some("https://img/1.png"));
        assert!(draft.published.is_none());
    }

    #[test]
    fn test_missing_title_becomes_blank() {
        let request: CreateCourseRequest =
            serde_json::from_str(r#"{"description":"Ownership","price":49.0}"#).unwrap();
        let draft = CourseDraft::from(request);
        assert!(draft.title.is_empty());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let request = UpdateCourseRequest {
            title: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
