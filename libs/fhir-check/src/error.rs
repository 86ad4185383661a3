use serde_json::Value;
use sonde_client::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Client(#[from] sonde_client::Error),

    #[error("expected status {expected}, got {actual}: {body}")]
    Status {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    #[error("expected {expected} bundle entries, got {actual}")]
    EntryCount { expected: usize, actual: usize },

    #[error("field {field:?}: expected {expected}, got {actual}")]
    FieldMismatch {
        field: String,
        expected: Value,
        actual: Value,
    },

    #[error("unexpected response shape: {0}")]
    Shape(String),
}
