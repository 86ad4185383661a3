//! FHIR resource payload construction.
//!
//! Builders for the four resource kinds exercised against a FHIR server
//! (Patient, Device, Group, Observation) plus batch Bundles, and the
//! `<Type>/<id>` relative-reference type used to cross-link Observations to
//! previously created Patient and Device records.
//!
//! Payloads are plain `serde_json::Value` trees, constructed fresh per
//! request and discarded after send. No local validation is performed;
//! malformed payloads are only caught by the remote server's response code.

mod builders;
mod instant;
mod reference;

pub use builders::{
    batch_bundle, device, group, observation, patient, random_device_name, ObservationSpec,
};
pub use instant::{instant_plus_seconds, reference_instant, REFERENCE_INSTANT};
pub use reference::{MalformedReference, RelativeReference, ResourceType};
