use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Fixture setup failed; without the example subject and device no
    /// Observation can be generated.
    #[error("unable to create {what}: {source}")]
    Setup {
        what: &'static str,
        #[source]
        source: sonde_client::Error,
    },

    /// A worker hit a transport-level failure mid-run. Non-success statuses
    /// are recorded as NaN samples instead and do not end up here.
    #[error(transparent)]
    Client(#[from] sonde_client::Error),

    #[error("failed to write results to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
