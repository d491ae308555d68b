use thiserror::Error;

use crate::client::GatewayError;
use crate::entity::ValidationErrors;

#[derive(Error, Debug)]
pub enum NotekeeperError {
    #[error("Note not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, NotekeeperError>;
