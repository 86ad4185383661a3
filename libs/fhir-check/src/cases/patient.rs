//! Patient lifecycle and search checks.

use sonde_client::{Created, FhirClient, StatusCode};
use sonde_payloads::{self as payloads, RelativeReference, ResourceType};

use crate::cases::{delete_created, ensure_status};
use crate::error::CheckError;

const IDENTIFIER_VALUE: &str = "John Doe";

async fn setup(client: &FhirClient) -> Result<Created, CheckError> {
    let created = client
        .create(ResourceType::Patient, &payloads::patient(IDENTIFIER_VALUE))
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

pub async fn search_by_identifier(client: &FhirClient) -> Result<(), CheckError> {
    let created = setup(client).await?;
    let body: Result<(), CheckError> = async {
        let response = client
            .search(ResourceType::Patient, &[("identifier", IDENTIFIER_VALUE)])
            .await?;
        ensure_status(response, StatusCode::OK)?;
        Ok(())
    }
    .await;
    let teardown = delete_created(client, &created).await;
    body.and(teardown)
}

pub async fn delete_missing_returns_not_found(client: &FhirClient) -> Result<(), CheckError> {
    let reference = RelativeReference::new("Patient", "42");
    let response = client.delete(&reference).await?;
    ensure_status(response, StatusCode::NOT_FOUND)?;
    Ok(())
}
