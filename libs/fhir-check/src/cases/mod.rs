//! The individual check cases, grouped by resource kind.
//!
//! Every case cleans up what it created even when an assertion in its body
//! fails; the body's error takes precedence over a teardown error in the
//! reported outcome.

pub mod bundle;
pub mod device;
pub mod group;
pub mod observation;
pub mod patient;

use sonde_client::{Created, FhirClient, FhirResponse, StatusCode};

use crate::error::CheckError;

/// The server advertises a CapabilityStatement at `{base}/metadata`.
pub async fn metadata_is_available(client: &FhirClient) -> Result<(), CheckError> {
    let response = client.metadata().await?;
    ensure_status(response, StatusCode::OK)?;
    Ok(())
}

pub(crate) fn ensure_status(
    response: FhirResponse,
    expected: StatusCode,
) -> Result<FhirResponse, CheckError> {
    if response.status == expected {
        Ok(response)
    } else {
        Err(CheckError::Status {
            expected,
            actual: response.status,
            body: response.body,
        })
    }
}

/// Delete a created resource and require a 204.
pub(crate) async fn delete_created(
    client: &FhirClient,
    created: &Created,
) -> Result<(), CheckError> {
    let response = client.delete_url(&created.location).await?;
    ensure_status(response, StatusCode::NO_CONTENT)?;
    Ok(())
}
