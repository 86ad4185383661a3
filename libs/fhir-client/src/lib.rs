//! Thin REST client for an external FHIR server.
//!
//! Issues single POST/GET/DELETE interactions over plain HTTP/JSON and
//! records status code, headers, body, and elapsed wall-clock time per call.
//! There is no retry, backoff, or timeout handling; failure semantics are
//! the caller's concern (the benchmark records a sentinel, the conformance
//! checks fail the current case).

mod client;
mod error;

pub use client::{Created, FhirClient, FhirResponse};
pub use error::{Error, Result};
pub use reqwest::StatusCode;
