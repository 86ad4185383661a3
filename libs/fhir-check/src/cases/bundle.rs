//! Batch Bundle submission check.

use sonde_client::{FhirClient, StatusCode};
use sonde_payloads::{self as payloads, ObservationSpec, ResourceType};

use crate::cases::ensure_status;
use crate::error::CheckError;

/// POSTing a batch Bundle of two Observations to the base endpoint answers
/// 200, and the response Bundle reports "201 Created" plus a location for
/// each entry. The status code alone does not prove the entries were
/// accepted, so each per-entry response is inspected.
pub async fn batch_reports_created_entries(client: &FhirClient) -> Result<(), CheckError> {
    let patient = client
        .create(ResourceType::Patient, &payloads::patient("Example Patient"))
        .await?;
    let device_name = payloads::random_device_name(&mut rand::thread_rng());
    let device = client
        .create(ResourceType::Device, &payloads::device(&device_name))
        .await?;

    let spec = ObservationSpec::new(
        patient.reference.clone(),
        device.reference.clone(),
        "2020-02-07T13:28:17.239+02:00",
    );
    let bundle = payloads::batch_bundle(&[
        payloads::observation(&spec),
        payloads::observation(
            &spec.with_effective_instant("2020-03-10T13:28:18.240+02:00"),
        ),
    ]);

    let mut created_locations: Vec<String> = Vec::new();
    let body: Result<(), CheckError> = async {
        let response = ensure_status(client.submit_bundle(&bundle).await?, StatusCode::OK)?;
        let value = response.json()?;
        let entries = value["entry"]
            .as_array()
            .ok_or_else(|| CheckError::Shape("Bundle.entry is not an array".to_string()))?;
        if entries.len() != 2 {
            return Err(CheckError::EntryCount {
                expected: 2,
                actual: entries.len(),
            });
        }
        for entry in entries {
            let status = entry["response"]["status"].as_str().unwrap_or_default();
            if status != "201 Created" {
                return Err(CheckError::Shape(format!(
                    "bundle entry response status was {status:?}, not \"201 Created\""
                )));
            }
            let location = entry["response"]["location"].as_str().ok_or_else(|| {
                CheckError::Shape("bundle entry response has no location".to_string())
            })?;
            created_locations.push(location.to_string());
        }
        Ok(())
    }
    .await;

    let mut teardown: Result<(), CheckError> = Ok(());
    for location in &created_locations {
        let result: Result<(), CheckError> = async {
            let response = client.delete_url(location).await?;
            ensure_status(response, StatusCode::NO_CONTENT)?;
            Ok(())
        }
        .await;
        teardown = teardown.and(result);
    }
    body.and(teardown)
}
