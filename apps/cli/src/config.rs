//! Configuration for the sonde CLI.
//!
//! Values come from defaults, an optional `sonde.toml` next to the working
//! directory, and `SONDE__`-prefixed environment variables (double
//! underscore maps to nesting, e.g. `SONDE__SERVER__BASE_URL`). CLI flags
//! override everything.

use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub bench: BenchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the FHIR endpoint under test, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenchConfig {
    /// Number of concurrent requests kept in flight.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Total number of Observations to create.
    #[serde(default = "default_requests")]
    pub requests: usize,
    /// Directory the result CSV is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Optional label embedded in the result file name, to distinguish
    /// target servers.
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Use JSON formatting for logs.
    #[serde(default)]
    pub json: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080/fhir".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_requests() -> usize {
    1000
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from defaults, config file, and environment.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("server.base_url", default_base_url())?
            .set_default("bench.workers", default_workers() as i64)?
            .set_default("bench.requests", default_requests() as i64)?
            .set_default("bench.output_dir", default_output_dir())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .add_source(config::File::with_name("sonde").required(false))
            .add_source(
                config::Environment::with_prefix("SONDE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), String> {
        Url::parse(&self.server.base_url)
            .map_err(|e| format!("server.base_url is not a valid URL: {e}"))?;
        if self.bench.workers == 0 {
            return Err("bench.workers must be at least 1".to_string());
        }
        if self.bench.requests == 0 {
            return Err("bench.requests must be at least 1".to_string());
        }
        Ok(())
    }
}
