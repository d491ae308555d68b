// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::timestamp;
use super::validation::{self, ValidationErrors};

/// A persisted note. Identity and timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Write payload for create and update.
///
/// Fields are kept as raw JSON so that a missing field or a non-string value
/// is reported as a validation message instead of a body parse failure. Any
/// `id`, `createdAt` or `updatedAt` sent by a client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            description: Some(Value::String(description.into())),
        }
    }

    /// Check the payload against the store's bounds, collecting every
    /// failing field.
    pub fn validate(&self) -> Result<NoteFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = validation::check_field(
            &mut errors,
            "title",
            "Title",
            self.title.as_ref(),
            validation::MAX_TITLE_LENGTH,
        );
        let description = validation::check_field(
            &mut errors,
            "description",
            "Description",
            self.description.as_ref(),
            validation::MAX_DESCRIPTION_LENGTH,
        );

        match (title, description) {
            (Some(title), Some(description)) if errors.is_empty() => {
                Ok(NoteFields { title, description })
            }
            _ => Err(errors),
        }
    }
}

/// The user-editable part of a note after it passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub description: String,
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAcknowledgement {
    #[serde(default)]
    pub raw: Vec<Value>,
    pub affected: u64,
}

impl DeleteAcknowledgement {
    pub fn single() -> Self {
        Self {
            raw: Vec::new(),
            affected: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_serializes_camel_case_with_millis() {
        let ts = crate::entity::timestamp::parse("2024-05-01T10:00:00.123Z").unwrap();
        let note = Note {
            id: 1,
            title: "Groceries".to_string(),
            description: "Buy milk and eggs".to_string(),
            created_at: ts,
            updated_at: ts,
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "Groceries",
                "description": "Buy milk and eggs",
                "createdAt": "2024-05-01T10:00:00.123Z",
                "updatedAt": "2024-05-01T10:00:00.123Z"
            })
        );

        let parsed: Note = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, note);
    }

    #[test]
    fn test_input_ignores_store_owned_fields() {
        let input: NoteInput = serde_json::from_value(json!({
            "id": 99,
            "title": "Title",
            "description": "Body",
            "createdAt": "2000-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(input, NoteInput::new("Title", "Body"));
    }

    #[test]
    fn test_input_null_is_missing() {
        let input: NoteInput =
            serde_json::from_value(json!({"title": null, "description": "x"})).unwrap();
        assert!(input.title.is_none());
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let fields = NoteInput::new("a", "b").validate().unwrap();
        assert_eq!(fields.title, "a");

        let fields = NoteInput::new("t".repeat(100), "d".repeat(1000))
            .validate()
            .unwrap();
        assert_eq!(fields.title.len(), 100);
        assert_eq!(fields.description.len(), 1000);
    }

    #[test]
    fn test_validate_reports_all_fields() {
        let errors = NoteInput::new("", "d".repeat(1001)).validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(
            errors.get("description"),
            Some("Description must not exceed 1000 characters")
        );
    }

    #[test]
    fn test_validate_missing_and_non_string() {
        let input: NoteInput = serde_json::from_value(json!({"title": 42})).unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title must be a string"));
        assert_eq!(errors.get("description"), Some("Description is required"));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        // 100 two-byte characters
        let title = "é".repeat(100);
        assert!(NoteInput::new(title, "x").validate().is_ok());
    }

    #[test]
    fn test_delete_acknowledgement_shape() {
        let value = serde_json::to_value(DeleteAcknowledgement::single()).unwrap();
        assert_eq!(value, json!({"raw": [], "affected": 1}));
    }
}
