//! sonde - load generation and conformance checks for FHIR REST servers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;

use config::Config;

#[derive(Parser)]
#[command(
    name = "sonde",
    about = "Load generation and conformance checks for FHIR REST servers",
    version,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Observation ingest benchmark and write per-request latencies
    /// to a CSV file.
    Bench {
        /// Base URL of the FHIR server under test.
        #[arg(short, long)]
        server: Option<String>,
        /// Number of concurrent requests kept in flight.
        #[arg(short, long)]
        workers: Option<usize>,
        /// Total number of Observations to create.
        #[arg(short = 'n', long)]
        requests: Option<usize>,
        /// Label embedded in the result file name (e.g. the server flavor).
        #[arg(short, long)]
        label: Option<String>,
        /// Directory the result CSV is written to.
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Run the CRUD conformance checks against a FHIR server.
    Check {
        /// Base URL of the FHIR server under test.
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Print CLI version.
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Bench {
            server,
            workers,
            requests,
            label,
            output_dir,
        } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }
            if let Some(workers) = workers {
                config.bench.workers = workers;
            }
            if let Some(requests) = requests {
                config.bench.requests = requests;
            }
            if let Some(label) = label {
                config.bench.label = Some(label);
            }
            if let Some(output_dir) = output_dir {
                config.bench.output_dir = output_dir;
            }
            config
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

            commands::bench::run(&config).await?;
        }
        Commands::Check { server } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }
            config
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

            let report = commands::check::run(&config).await?;
            if !report.all_passed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
