//! The `sonde bench` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use sonde_bench::{run_pool, writer, BenchmarkFixture, LatencySummary};
use sonde_client::FhirClient;

use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let workers = config.bench.workers;
    let requests = config.bench.requests;

    let client = FhirClient::new(&config.server.base_url)
        .context("Failed to construct FHIR client")?;

    tracing::info!(
        server = %config.server.base_url,
        workers,
        requests,
        "Preparing benchmark fixture"
    );
    let fixture = BenchmarkFixture::prepare(&client)
        .await
        .context("Failed to prepare benchmark fixture")?;

    let payloads = fixture.request_payloads(requests);

    tracing::info!("Starting benchmark");
    let started = Instant::now();
    let samples = run_pool(&client, payloads, workers)
        .await
        .context("Benchmark run aborted")?;
    let wall_time = started.elapsed();

    let summary = LatencySummary::from_samples(&samples, wall_time);

    let path = Path::new(&config.bench.output_dir).join(writer::file_name(
        config.bench.label.as_deref(),
        workers,
        requests,
    ));
    writer::write_samples(&path, &samples)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;

    println!("{summary}");
    println!("Results written to {}", path.display());
    Ok(())
}
