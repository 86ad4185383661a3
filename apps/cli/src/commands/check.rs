//! The `sonde check` command.

use anyhow::{Context, Result};

use sonde_check::CheckReport;
use sonde_client::FhirClient;

use crate::config::Config;

pub async fn run(config: &Config) -> Result<CheckReport> {
    let client = FhirClient::new(&config.server.base_url)
        .context("Failed to construct FHIR client")?;

    tracing::info!(server = %config.server.base_url, "Running conformance checks");
    let report = sonde_check::run_all(&client).await;

    for result in report.results() {
        match &result.outcome {
            Ok(()) => println!("PASS {}", result.name),
            Err(error) => println!("FAIL {}: {error}", result.name),
        }
    }
    println!(
        "{} checks, {} passed, {} failed",
        report.results().len(),
        report.passed(),
        report.failed()
    );
    Ok(report)
}
