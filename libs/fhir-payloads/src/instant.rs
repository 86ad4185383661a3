//! Effective-instant handling for generated Observations.

use chrono::{DateTime, Duration, FixedOffset};

/// The fixed instant every generated Observation series is keyed off.
pub const REFERENCE_INSTANT: &str = "2015-02-07T13:28:17.239+02:00";

/// The reference instant as a typed value.
pub fn reference_instant() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(REFERENCE_INSTANT).expect("reference instant is valid RFC 3339")
}

/// The reference instant shifted by `seconds`, rendered with millisecond
/// precision. The benchmark assigns each Observation a distinct instant by
/// passing its request index here.
pub fn instant_plus_seconds(seconds: i64) -> String {
    let shifted = reference_instant() + Duration::seconds(seconds);
    shifted.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
