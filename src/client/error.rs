use std::collections::BTreeMap;

use thiserror::Error;

use crate::entity::ErrorBody;

/// Failure of a gateway call. Nothing is retried; the status and body the
/// server sent are kept as they were.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GatewayError {
    /// HTTP status of the response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, if one arrived.
    pub fn body(&self) -> Option<&str> {
        match self {
            GatewayError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }

    /// The store's structured error body, when the response carried one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        self.body().and_then(|b| serde_json::from_str(b).ok())
    }

    /// Per-field validation messages from a 400 response.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        if self.status() != Some(400) {
            return BTreeMap::new();
        }
        self.error_body()
            .and_then(|b| b.errors)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let err = GatewayError::Status {
            status: 404,
            body: r#"{"statusCode":404,"error":"Not Found","message":"Note not found"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert!(err.field_errors().is_empty());
        assert_eq!(
            err.error_body().unwrap().message.to_vec(),
            vec!["Note not found"]
        );
    }

    #[test]
    fn test_field_errors_from_400() {
        let err = GatewayError::Status {
            status: 400,
            body: r#"{"statusCode":400,"error":"Bad Request","message":["Title is required"],"errors":{"title":"Title is required"}}"#.to_string(),
        };
        let fields = err.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["title"], "Title is required");
    }

    #[test]
    fn test_non_json_body_is_kept() {
        let err = GatewayError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.body(), Some("Bad Gateway"));
        assert!(err.error_body().is_none());
    }
}
