use reqwest::StatusCode;
use sonde_payloads::MalformedReference;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport-level failure (connection refused, reset, DNS, ...).
    /// There is no retry; the caller sees the failure immediately.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    #[error("response is missing a location header")]
    MissingLocation,

    #[error(transparent)]
    Reference(#[from] MalformedReference),

    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
