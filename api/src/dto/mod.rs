//! Request and response bodies for the HTTP API

pub mod auth;
pub mod course;

pub use cm_shared::errors::ErrorResponse;

use cm_core::ValidationError;

use serde::{Deserialize, Serialize};

/// Response carrying only a confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reduce `validator` failures to the first offending field
///
/// An empty value is reported as a missing field, anything else as a format
/// problem.
pub fn into_validation_error(errors: &validator::ValidationErrors) -> ValidationError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    match fields.first() {
        Some((field, failures)) => {
            let blank = failures.iter().any(|failure| {
                failure
                    .params
                    .get("value")
                    .and_then(|value| value.as_str())
                    .map_or(false, |value| value.trim().is_empty())
            });
            if blank {
                ValidationError::RequiredField {
                    field: field.to_string(),
                }
            } else {
                ValidationError::InvalidFormat {
                    field: field.to_string(),
                }
            }
        }
        None => ValidationError::InvalidFormat {
            field: "body".to_string(),
        },
    }
}
