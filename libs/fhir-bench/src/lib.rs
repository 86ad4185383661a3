//! Observation ingest benchmark against an external FHIR server.
//!
//! Pipeline: prepare the fixture (one example Patient and Device whose
//! references every generated Observation links to), generate the request
//! payloads, fan them out across a bounded worker pool, then write one
//! latency per row to a headerless CSV and summarize the run.

mod error;
mod fixture;
mod pool;
mod sample;
mod summary;
pub mod writer;

pub use error::BenchError;
pub use fixture::BenchmarkFixture;
pub use pool::run_pool;
pub use sample::TimingSample;
pub use summary::LatencySummary;
