//! Payload builders for the exercised resource kinds.
//!
//! Field shapes mirror what the target server accepts: mostly-static
//! clinical metadata with a few randomized numeric or string values. The
//! Observation models a wrist-worn accelerometer reading with one component
//! per axis.

use rand::Rng;
use serde_json::{json, Value};

use crate::reference::RelativeReference;

const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";
const LOINC_SYSTEM: &str = "http://loinc.org";
const ACCELERATION_UNIT: &str = "m/s^2";

/// LOINC codes for the three acceleration axes, in component order.
const AXES: [(&str, &str); 3] = [
    ("X42", "Acceleration on the X axis"),
    ("X43", "Acceleration on the Y axis"),
    ("X44", "Acceleration on the Z axis"),
];

/// Simulated accelerometer readings are bounded to this symmetric range.
const ACCELERATION_BOUND: f64 = 3.0;

/// An active Patient identified by `identifier.value`.
pub fn patient(identifier_value: &str) -> Value {
    json!({
        "resourceType": "Patient",
        "active": true,
        "identifier": { "value": identifier_value },
    })
}

/// A Device identified by its `distinctIdentifier`. The server rejects a
/// second Device with the same identifier (422).
pub fn device(distinct_identifier: &str) -> Value {
    json!({
        "resourceType": "Device",
        "distinctIdentifier": distinct_identifier,
    })
}

/// A six-character uppercase alphanumeric Device name, so repeated runs
/// against a dirty server don't collide on `distinctIdentifier`.
pub fn random_device_name(rng: &mut impl Rng) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    (0..6)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// An actual person Group with the given name.
pub fn group(name: &str) -> Value {
    json!({
        "resourceType": "Group",
        "active": true,
        "actual": true,
        "type": "person",
        "name": name,
    })
}

/// Everything that varies between generated Observations: the subject and
/// device links, the effective instant, and the per-axis acceleration values.
#[derive(Debug, Clone)]
pub struct ObservationSpec {
    pub subject: RelativeReference,
    pub device: RelativeReference,
    pub effective_instant: String,
    pub accelerations: [f64; 3],
}

impl ObservationSpec {
    /// A spec with fixed, easily recognizable axis values (1.0, 2.0, 3.0).
    pub fn new(
        subject: RelativeReference,
        device: RelativeReference,
        effective_instant: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            device,
            effective_instant: effective_instant.into(),
            accelerations: [1.0, 2.0, 3.0],
        }
    }

    pub fn with_effective_instant(mut self, effective_instant: impl Into<String>) -> Self {
        self.effective_instant = effective_instant.into();
        self
    }

    /// Draw fresh axis values uniformly from [-3.0, 3.0].
    pub fn with_random_accelerations(mut self, rng: &mut impl Rng) -> Self {
        for value in &mut self.accelerations {
            *value = rng.gen_range(-ACCELERATION_BOUND..=ACCELERATION_BOUND);
        }
        self
    }
}

/// A final procedure Observation from a wrist-worn accelerometer, with one
/// component per axis.
pub fn observation(spec: &ObservationSpec) -> Value {
    let procedure_coding = json!({
        "coding": [{
            "system": OBSERVATION_CATEGORY_SYSTEM,
            "code": "procedure",
            "display": "Procedure",
        }]
    });

    let components: Vec<Value> = AXES
        .iter()
        .zip(spec.accelerations.iter())
        .map(|((code, display), value)| {
            json!({
                "code": {
                    "coding": [{
                        "system": LOINC_SYSTEM,
                        "code": code,
                        "display": display,
                    }],
                },
                "valueQuantity": { "value": value, "unit": ACCELERATION_UNIT },
            })
        })
        .collect();

    json!({
        "resourceType": "Observation",
        "status": "final",
        "category": [procedure_coding],
        "code": procedure_coding,
        "effectiveInstant": spec.effective_instant,
        "subject": { "reference": spec.subject.to_string() },
        "bodySite": {
            "coding": [{
                "system": "Custom",
                "code": "leftWrist",
                "display": "Left wrist",
            }]
        },
        "device": { "reference": spec.device.to_string() },
        "component": components,
    })
}

/// A batch Bundle wrapping the given resources, submitted to the server's
/// base endpoint.
pub fn batch_bundle(resources: &[Value]) -> Value {
    let entries: Vec<Value> = resources
        .iter()
        .map(|resource| json!({ "resource": resource }))
        .collect();
    json!({
        "resourceType": "Bundle",
        "type": "batch",
        "entry": entries,
    })
}
