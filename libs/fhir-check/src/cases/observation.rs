//! The cross-resource Observation scenario: a Patient and a Device are
//! created, two Observations reference them at different instants, and a
//! filtered search must return exactly the matching one.

use chrono::DateTime;
use serde_json::Value;
use sonde_client::{Created, FhirClient, StatusCode};
use sonde_payloads::{
    self as payloads, ObservationSpec, RelativeReference, ResourceType, REFERENCE_INSTANT,
};

use crate::cases::{delete_created, ensure_status};
use crate::error::CheckError;

const EARLIER_INSTANT: &str = "2010-02-07T13:28:17.239+02:00";

struct Scenario {
    /// The payload of the first Observation, which the filtered search is
    /// expected to return.
    payload: Value,
    subject: RelativeReference,
    observations: Vec<Created>,
}

async fn setup(client: &FhirClient) -> Result<Scenario, CheckError> {
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
        REFERENCE_INSTANT,
    );
    let payload = payloads::observation(&spec);
    let first = client.create(ResourceType::Observation, &payload).await?;

    let earlier = payloads::observation(&spec.with_effective_instant(EARLIER_INSTANT));
    let second = client.create(ResourceType::Observation, &earlier).await?;

    Ok(Scenario {
        payload,
        subject: patient.reference,
        observations: vec![first, second],
    })
}

async fn teardown(client: &FhirClient, scenario: &Scenario) -> Result<(), CheckError> {
    let mut outcome = Ok(());
    for created in &scenario.observations {
        outcome = outcome.and(delete_created(client, created).await);
    }
    outcome
}

pub async fn insert_and_delete(client: &FhirClient) -> Result<(), CheckError> {
    let scenario = setup(client).await?;
    teardown(client, &scenario).await
}

pub async fn filtered_search_returns_single_match(client: &FhirClient) -> Result<(), CheckError> {
    let scenario = setup(client).await?;
    let subject = scenario.subject.to_string();
    let body: Result<(), CheckError> = async {
        let response = client
            .search(
                ResourceType::Observation,
                &[
                    ("category", "procedure"),
                    ("subject", subject.as_str()),
                    ("date", "ge2011-01-02"),
                ],
            )
            .await?;
        let response = ensure_status(response, StatusCode::OK)?;
        let bundle = response.json()?;
        let entries = bundle["entry"]
            .as_array()
            .ok_or_else(|| CheckError::Shape("Bundle.entry is not an array".to_string()))?;
        if entries.len() != 1 {
            return Err(CheckError::EntryCount {
                expected: 1,
                actual: entries.len(),
            });
        }
        assert_matches(&scenario.payload, &entries[0]["resource"])
    }
    .await;
    let teardown = teardown(client, &scenario).await;
    body.and(teardown)
}

/// Compare a returned resource against the payload it was created from,
/// ignoring server-assigned fields. The server may normalize
/// `effectiveInstant` to UTC, so instants are compared as points in time
/// rather than strings.
fn assert_matches(payload: &Value, resource: &Value) -> Result<(), CheckError> {
    let fields = resource
        .as_object()
        .ok_or_else(|| CheckError::Shape("entry resource is not an object".to_string()))?;

    for (field, actual) in fields {
        if field == "id" || field == "meta" {
            continue;
        }
        let expected = &payload[field];
        if field == "effectiveInstant" {
            if !instants_equal(expected, actual) {
                return Err(CheckError::FieldMismatch {
                    field: field.clone(),
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
            continue;
        }
        if expected != actual {
            return Err(CheckError::FieldMismatch {
                field: field.clone(),
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }
    Ok(())
}

fn instants_equal(expected: &Value, actual: &Value) -> bool {
    match (expected.as_str(), actual.as_str()) {
        (Some(expected), Some(actual)) => {
            match (
                DateTime::parse_from_rfc3339(expected),
                DateTime::parse_from_rfc3339(actual),
            ) {
                (Ok(expected), Ok(actual)) => expected == actual,
                _ => false,
            }
        }
        _ => false,
    }
}
