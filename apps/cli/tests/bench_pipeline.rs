//! End-to-end runs of the benchmark pipeline against the stub server.

mod support;

use std::time::Duration;

use serde_json::json;
use sonde_bench::{run_pool, writer, BenchError, BenchmarkFixture, LatencySummary};
use sonde_client::FhirClient;

#[tokio::test]
async fn pool_returns_one_sample_per_payload() {
    let server = support::spawn().await;
    let client = FhirClient::new(&server.base_url).unwrap();

    let fixture = BenchmarkFixture::prepare(&client).await.unwrap();
    assert_eq!(fixture.subject.resource_type, "Patient");
    assert_eq!(fixture.device.resource_type, "Device");

    let payloads = fixture.request_payloads(12);
    let samples = run_pool(&client, payloads, 3).await.unwrap();

    assert_eq!(samples.len(), 12);
    for sample in &samples {
        assert!(!sample.is_failure());
        assert!(sample.seconds() >= 0.0);
    }
}

#[tokio::test]
async fn rejected_requests_become_nan_rows_at_their_position() {
    let server = support::spawn().await;
    let client = FhirClient::new(&server.base_url).unwrap();

    let fixture = BenchmarkFixture::prepare(&client).await.unwrap();
    let mut payloads = fixture.request_payloads(6);
    // The stub rejects payloads whose resourceType doesn't match the
    // endpoint, so this one fails while the rest succeed.
    payloads[2] = json!({ "resourceType": "Bogus" });

    let samples = run_pool(&client, payloads, 2).await.unwrap();
    assert_eq!(samples.len(), 6);
    for (i, sample) in samples.iter().enumerate() {
        assert_eq!(sample.is_failure(), i == 2, "sample {i}");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(writer::file_name(None, 2, 6));
    writer::write_samples(&path, &samples).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = contents.lines().collect();
    assert_eq!(rows.len(), 6);
    for (i, row) in rows.iter().enumerate() {
        if i == 2 {
            assert_eq!(*row, "NaN");
        } else {
            let value: f64 = row.parse().unwrap();
            assert!(value >= 0.0);
        }
    }

    let summary = LatencySummary::from_samples(&samples, Duration::from_millis(100));
    assert_eq!(summary.total(), 6);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.succeeded(), 5);
}

#[tokio::test]
async fn fixture_setup_fails_without_a_reachable_server() {
    // Nothing listens here; the connection is refused immediately.
    let client = FhirClient::new("http://127.0.0.1:1/fhir").unwrap();
    let error = BenchmarkFixture::prepare(&client).await.unwrap_err();
    assert!(matches!(error, BenchError::Setup { what, .. } if what == "example subject"));
}
