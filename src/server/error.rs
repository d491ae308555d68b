//! HTTP-facing error type and its mapping to status codes and bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::entity::{ErrorBody, ErrorMessage, ValidationErrors};
use crate::error::NotekeeperError;

pub const NOTE_NOT_FOUND: &str = "Note not found";
pub const NUMERIC_ID_EXPECTED: &str = "Validation failed (numeric string is expected)";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Note not found: {id}")]
    NotFound { id: i64 },

    #[error("Validation failed: {0}")]
    InvalidInput(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let status = self.status();
        let (message, errors) = match self {
            ApiError::NotFound { .. } => (ErrorMessage::One(NOTE_NOT_FOUND.to_string()), None),
            ApiError::InvalidInput(fields) => (
                ErrorMessage::Many(fields.messages()),
                Some(
                    fields
                        .iter()
                        .map(|e| (e.field.clone(), e.message.clone()))
                        .collect(),
                ),
            ),
            ApiError::BadRequest(msg) => (ErrorMessage::One(msg.clone()), None),
            // storage details stay in the log
            ApiError::Internal(_) => (
                ErrorMessage::One("Internal server error".to_string()),
                None,
            ),
        };

        ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            errors,
        }
    }
}

impl From<NotekeeperError> for ApiError {
    fn from(err: NotekeeperError) -> Self {
        match err {
            NotekeeperError::NotFound(id) => ApiError::NotFound { id },
            NotekeeperError::InvalidInput(fields) => ApiError::InvalidInput(fields),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => tracing::error!(%detail, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound { id: 1 }.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidInput(ValidationErrors::default()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("disk".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_notekeeper_error() {
        let api: ApiError = NotekeeperError::NotFound(3).into();
        assert!(matches!(api, ApiError::NotFound { id: 3 }));

        let api: ApiError = NotekeeperError::Storage("locked".to_string()).into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[test]
    fn test_validation_body() {
        let mut fields = ValidationErrors::default();
        fields.add("title", "Title is required");
        fields.add("description", "Description must not exceed 1000 characters");

        let body = serde_json::to_value(ApiError::InvalidInput(fields).body()).unwrap();
        assert_eq!(
            body,
            json!({
                "statusCode": 400,
                "error": "Bad Request",
                "message": ["Title is required", "Description must not exceed 1000 characters"],
                "errors": {
                    "title": "Title is required",
                    "description": "Description must not exceed 1000 characters"
                }
            })
        );
    }

    #[test]
    fn test_internal_body_hides_detail() {
        let body = ApiError::Internal("SQLite error: disk I/O".to_string()).body();
        assert_eq!(body.message.to_vec(), vec!["Internal server error"]);
    }
}
