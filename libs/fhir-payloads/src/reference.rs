//! Resource types and `<Type>/<id>` relative references.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// The FHIR resource kinds this toolkit exercises. The REST path segment is
/// the type name itself (`POST {base}/Patient`, `GET {base}/Device/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Patient,
    Device,
    Group,
    Observation,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "Patient",
            ResourceType::Device => "Device",
            ResourceType::Group => "Group",
            ResourceType::Observation => "Observation",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value could not be parsed into a `<Type>/<id>` reference.
#[derive(Debug, Error)]
#[error("cannot extract a <Type>/<id> reference from {0:?}")]
pub struct MalformedReference(pub String);

lazy_static! {
    // Matches the trailing `<Type>/<id>` pair of a location header value,
    // tolerating both absolute and relative forms and an optional
    // `/_history/<vid>` suffix as returned by FHIR create interactions.
    static ref REFERENCE_RE: Regex = Regex::new(
        r"([A-Za-z]+)/([A-Za-z0-9\-\.]{1,64})(?:/_history/[A-Za-z0-9\-\.]{1,64})?$"
    )
    .expect("reference pattern is valid");
}

/// A `<Type>/<id>` reference to a resource instance, used to cross-link
/// resources (e.g. `Observation.subject` → `Patient/17`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeReference {
    pub resource_type: String,
    pub id: String,
}

impl RelativeReference {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Extract the relative reference from a `location` header value.
    ///
    /// Accepts absolute locations (`http://host/fhir/Patient/17/_history/1`)
    /// as well as bare relative ones (`Patient/17`).
    pub fn parse(location: &str) -> Result<Self, MalformedReference> {
        let captures = REFERENCE_RE
            .captures(location)
            .ok_or_else(|| MalformedReference(location.to_string()))?;
        Ok(Self {
            resource_type: captures[1].to_string(),
            id: captures[2].to_string(),
        })
    }
}

impl fmt::Display for RelativeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_location() {
        let reference =
            RelativeReference::parse("http://localhost:8080/fhir/Patient/17").unwrap();
        assert_eq!(reference.resource_type, "Patient");
        assert_eq!(reference.id, "17");
        assert_eq!(reference.to_string(), "Patient/17");
    }

    #[test]
    fn strips_history_suffix() {
        let reference =
            RelativeReference::parse("http://localhost:8080/fhir/Device/abc-1/_history/3").unwrap();
        assert_eq!(reference.resource_type, "Device");
        assert_eq!(reference.id, "abc-1");
    }

    #[test]
    fn parses_bare_relative_form() {
        let reference = RelativeReference::parse("Observation/42").unwrap();
        assert_eq!(reference.resource_type, "Observation");
        assert_eq!(reference.id, "42");
    }

    #[test]
    fn rejects_values_without_a_reference() {
        assert!(RelativeReference::parse("http://localhost:8080/fhir").is_err());
        assert!(RelativeReference::parse("").is_err());
    }

    #[test]
    fn resource_type_matches_rest_path_segment() {
        assert_eq!(ResourceType::Observation.to_string(), "Observation");
        assert_eq!(ResourceType::Group.as_str(), "Group");
    }
}
