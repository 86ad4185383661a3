//! Device lifecycle checks.

use serde_json::Value;
use sonde_client::{Created, FhirClient, StatusCode};
use sonde_payloads::{self as payloads, RelativeReference, ResourceType};

use crate::cases::{delete_created, ensure_status};
use crate::error::CheckError;

async fn setup(client: &FhirClient) -> Result<(Value, Created), CheckError> {
    // Unique name per case so reruns against a dirty server don't collide.
    let name = payloads::random_device_name(&mut rand::thread_rng());
    let payload = payloads::device(&name);
    let created = client.create(ResourceType::Device, &payload).await?;
    Ok((payload, created))
}

pub async fn create_and_delete(client: &FhirClient) -> Result<(), CheckError> {
    let (_, created) = setup(client).await?;
    delete_created(client, &created).await
}

/// Re-posting an identical Device payload is rejected as unprocessable.
pub async fn duplicate_is_rejected(client: &FhirClient) -> Result<(), CheckError> {
    let (payload, created) = setup(client).await?;
    let body: Result<(), CheckError> = async {
        let response = client.post(ResourceType::Device, &payload).await?;
        ensure_status(response, StatusCode::UNPROCESSABLE_ENTITY)?;
        Ok(())
    }
    .await;
    let teardown = delete_created(client, &created).await;
    body.and(teardown)
}

pub async fn created_resource_is_readable(client: &FhirClient) -> Result<(), CheckError> {
    let (_, created) = setup(client).await?;
    let body: Result<(), CheckError> = async {
        let response = client.read_url(&created.location).await?;
        ensure_status(response, StatusCode::OK)?;
        Ok(())
    }
    .await;
    let teardown = delete_created(client, &created).await;
    body.and(teardown)
}

pub async fn delete_missing_returns_not_found(client: &FhirClient) -> Result<(), CheckError> {
    let reference = RelativeReference::new("Device", "AnotherExampleDevice");
    let response = client.delete(&reference).await?;
    ensure_status(response, StatusCode::NOT_FOUND)?;
    Ok(())
}
