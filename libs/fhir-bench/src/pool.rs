//! Bounded worker pool for the benchmark phase.

use futures::stream::{self, StreamExt};
use serde_json::Value;

use sonde_client::FhirClient;
use sonde_payloads::ResourceType;

use crate::error::BenchError;
use crate::sample::TimingSample;

/// POST every payload to `{base}/Observation` with at most `workers`
/// requests in flight, returning one sample per payload **in input order**.
///
/// A non-2xx status becomes a NaN sample; a transport failure aborts the
/// whole run. Each in-flight request holds its pool slot until the server
/// answers (there is no timeout).
pub async fn run_pool(
    client: &FhirClient,
    payloads: Vec<Value>,
    workers: usize,
) -> Result<Vec<TimingSample>, BenchError> {
    let results: Vec<Result<TimingSample, sonde_client::Error>> = stream::iter(payloads)
        .map(|payload| {
            let client = client.clone();
            async move {
                let response = client.post(ResourceType::Observation, &payload).await?;
                if response.status.is_success() {
                    Ok(TimingSample::from_success(response.elapsed))
                } else {
                    tracing::debug!(status = %response.status, "Request failed, recording NaN");
                    Ok(TimingSample::FAILED)
                }
            }
        })
        .buffered(workers.max(1))
        .collect()
        .await;

    results
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(BenchError::from)
}
