//! Conformance checks for a FHIR server's CRUD surface.
//!
//! Each check is a self-contained setup → action → assert → teardown
//! sequence validating the status codes the server answers with
//! (201 created, 422 duplicate rejected, 200 read, 404 missing,
//! 204 deleted). Checks run strictly sequentially; a failed assertion stops
//! the current check (its teardown still runs, so no server state is
//! leaked) and the remaining checks continue.

pub mod cases;
mod error;
mod report;
mod runner;

pub use error::CheckError;
pub use report::{CaseResult, CheckReport};
pub use runner::run_all;
