use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// JSON body of every error response the note store produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: ErrorMessage,
    /// Field name to message, present on validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            ErrorMessage::One(m) => vec![m.clone()],
            ErrorMessage::Many(ms) => ms.clone(),
        }
    }
}
