//! Review submission rules.

use serde::Deserialize;

use crate::error::CoreError;

/// Message returned when either review field is missing.
pub const REVIEW_FIELDS_REQUIRED: &str = "Both name and message are required!";

/// Raw review payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewDraft {
    pub name: Option<String>,
    pub message: Option<String>,
}

/// A review with both fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub name: String,
    pub message: String,
}

impl ReviewDraft {
    pub fn validate(self) -> Result<NewReview, CoreError> {
        match (self.name, self.message) {
            (Some(name), Some(message)) if !name.trim().is_empty() && !message.trim().is_empty() => {
                Ok(NewReview { name, message })
            }
            _ => Err(CoreError::Validation(REVIEW_FIELDS_REQUIRED.into())),
        }
    }
}
