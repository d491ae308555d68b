//! Server-side field validation for note payloads.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// A single failing field and its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field that failed validation, in field declaration order.
///
/// Serializes as a JSON object mapping field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for e in &self.errors {
            map.serialize_entry(&e.field, &e.message)?;
        }
        map.end()
    }
}

/// Check one required string field. Records at most one message for the
/// field and returns the value only when it is acceptable.
pub(super) fn check_field(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&Value>,
    max: usize,
) -> Option<String> {
    let text = match value {
        None => {
            errors.add(field, format!("{label} is required"));
            return None;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.add(field, format!("{label} must be a string"));
            return None;
        }
    };

    if text.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    if text.chars().count() > max {
        errors.add(field, format!("{label} must not exceed {max} characters"));
        return None;
    }

    Some(text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = ValidationErrors::default();
        errors.add("title", "Title is required");
        errors.add("description", "Description is required");

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"title": "Title is required", "description": "Description is required"})
        );
        assert_eq!(
            errors.to_string(),
            "Title is required; Description is required"
        );
    }

    #[test]
    fn test_check_field_whitespace_is_present() {
        let mut errors = ValidationErrors::default();
        let value = json!(" ");
        let out = check_field(&mut errors, "title", "Title", Some(&value), MAX_TITLE_LENGTH);
        assert_eq!(out.as_deref(), Some(" "));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_field_too_long() {
        let mut errors = ValidationErrors::default();
        let value = json!("x".repeat(101));
        let out = check_field(&mut errors, "title", "Title", Some(&value), MAX_TITLE_LENGTH);
        assert!(out.is_none());
        assert_eq!(errors.get("title"), Some("Title must not exceed 100 characters"));
    }
}
