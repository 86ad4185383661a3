//! Group lifecycle checks.

use sonde_client::{Created, FhirClient, StatusCode};
use sonde_payloads::{self as payloads, RelativeReference, ResourceType};

use crate::cases::{delete_created, ensure_status};
use crate::error::CheckError;

async fn setup(client: &FhirClient) -> Result<Created, CheckError> {
    let created = client
        .create(ResourceType::Group, &payloads::group("Test Group"))
        .await?;
    Ok(created)
}

pub async fn create_and_delete(client: &FhirClient) -> Result<(), CheckError> {
    let created = setup(client).await?;
    delete_created(client, &created).await
}

pub async fn created_resource_is_readable(client: &FhirClient) -> Result<(), CheckError> {
    let created = setup(client).await?;
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
    let reference = RelativeReference::new("Group", "42");
    let response = client.delete(&reference).await?;
    ensure_status(response, StatusCode::NOT_FOUND)?;
    Ok(())
}
