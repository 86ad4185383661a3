//! Benchmark fixture: the shared Patient and Device every generated
//! Observation references.

use rand::Rng;
use serde_json::Value;

use sonde_client::FhirClient;
use sonde_payloads::{
    self as payloads, instant_plus_seconds, ObservationSpec, RelativeReference, ResourceType,
};

use crate::error::BenchError;

const EXAMPLE_PATIENT_IDENTIFIER: &str = "Example Patient";
const EXAMPLE_DEVICE_IDENTIFIER: &str = "Example device";

#[derive(Debug, Clone)]
pub struct BenchmarkFixture {
    pub subject: RelativeReference,
    pub device: RelativeReference,
}

impl BenchmarkFixture {
    /// Create the example subject and device on the target server. Both must
    /// answer 201 with a parsable location; anything else aborts the run.
    pub async fn prepare(client: &FhirClient) -> Result<Self, BenchError> {
        let subject = client
            .create(
                ResourceType::Patient,
                &payloads::patient(EXAMPLE_PATIENT_IDENTIFIER),
            )
            .await
            .map_err(|source| BenchError::Setup {
                what: "example subject",
                source,
            })?;
        tracing::info!(reference = %subject.reference, "Created example subject");

        let device = client
            .create(
                ResourceType::Device,
                &payloads::device(EXAMPLE_DEVICE_IDENTIFIER),
            )
            .await
            .map_err(|source| BenchError::Setup {
                what: "example device",
                source,
            })?;
        tracing::info!(reference = %device.reference, "Created example device");

        Ok(Self {
            subject: subject.reference,
            device: device.reference,
        })
    }

    /// Generate `count` Observation payloads, the i-th effective at the
    /// reference instant plus i seconds, each with fresh random axis values.
    pub fn request_payloads(&self, count: usize) -> Vec<Value> {
        let mut rng = rand::thread_rng();
        self.request_payloads_with_rng(count, &mut rng)
    }

    pub fn request_payloads_with_rng(&self, count: usize, rng: &mut impl Rng) -> Vec<Value> {
        (0..count)
            .map(|i| {
                let spec = ObservationSpec::new(
                    self.subject.clone(),
                    self.device.clone(),
                    instant_plus_seconds(i as i64),
                )
                .with_random_accelerations(rng);
                payloads::observation(&spec)
            })
            .collect()
    }
}
