//! Structured validation errors for request payloads.
//!
//! Validation never stops at the first problem: every failing field is
//! collected so API clients can fix a payload in one round trip.

use std::fmt;

use serde::Serialize;

/// Maximum note title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found while validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a payload with exactly one problem.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a required title: non-empty and at most [`MAX_TITLE_LENGTH`] characters.
pub(crate) fn check_title(errors: &mut ValidationErrors, title: &str) {
    if title.is_empty() {
        errors.push("title", "must not be empty");
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        errors.push(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LENGTH),
        );
    }
}

/// Check required content: non-empty, otherwise unbounded.
pub(crate) fn check_content(errors: &mut ValidationErrors, content: &str) {
    if content.is_empty() {
        errors.push("content", "must not be empty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_at_limit_is_accepted() {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &"a".repeat(MAX_TITLE_LENGTH));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_title_over_limit_is_rejected() {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &"a".repeat(MAX_TITLE_LENGTH + 1));
        assert_eq!(errors.fields()[0].field, "title");
    }

    #[test]
    fn test_title_limit_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &"é".repeat(MAX_TITLE_LENGTH));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_values_are_rejected() {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, "");
        check_content(&mut errors, "");
        assert_eq!(errors.fields().len(), 2);
    }

    #[test]
    fn test_whitespace_values_are_accepted() {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, "   ");
        check_content(&mut errors, "\n");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("x", "bad").into_result().is_err());
    }

    #[test]
    fn test_serializes_as_array() {
        let errors = ValidationErrors::single("title", "must not be empty");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"field": "title", "message": "must not be empty"}])
        );
    }
}
