//! The REST client used by both the benchmark and the conformance checks.

use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use sonde_payloads::{RelativeReference, ResourceType};

use crate::error::{Error, Result};

/// One completed HTTP exchange: status, headers, body, and the wall-clock
/// time the round trip took.
#[derive(Debug)]
pub struct FhirResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    pub elapsed: Duration,
}

impl FhirResponse {
    /// Decode the response body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The `location` header value, if present and readable.
    pub fn location(&self) -> Result<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::MissingLocation)
    }
}

/// A successful create interaction: the raw response plus the parsed
/// location of the new resource.
#[derive(Debug)]
pub struct Created {
    pub response: FhirResponse,
    /// The location header value as returned by the server (absolute or
    /// relative).
    pub location: String,
    /// The `<Type>/<id>` reference extracted from the location.
    pub reference: RelativeReference,
}

/// Client for a single FHIR server base URL.
///
/// Deliberately has no request timeout and no retry: a stalled server stalls
/// the caller, and any non-success status is surfaced to the caller as data,
/// not handled here.
#[derive(Debug, Clone)]
pub struct FhirClient {
    http: reqwest::Client,
    base: String,
}

impl FhirClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|source| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn type_url(&self, resource_type: ResourceType) -> String {
        format!("{}/{}", self.base, resource_type)
    }

    /// Resolve a location header value to an absolute URL. Servers may
    /// return either absolute or relative locations.
    pub fn location_url(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            location.to_string()
        } else {
            format!("{}/{}", self.base, location.trim_start_matches('/'))
        }
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<FhirResponse> {
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        let elapsed = started.elapsed();
        tracing::debug!(
            %status,
            elapsed_ms = elapsed.as_millis() as u64,
            "FHIR request completed"
        );
        Ok(FhirResponse {
            status,
            headers,
            body,
            elapsed,
        })
    }

    /// GET `{base}/metadata` (the server's CapabilityStatement).
    pub async fn metadata(&self) -> Result<FhirResponse> {
        self.dispatch(self.http.get(format!("{}/metadata", self.base)))
            .await
    }

    /// POST a resource payload. The status is returned as-is; callers decide
    /// what counts as success.
    pub async fn post(&self, resource_type: ResourceType, payload: &Value) -> Result<FhirResponse> {
        self.dispatch(self.http.post(self.type_url(resource_type)).json(payload))
            .await
    }

    /// POST a resource payload and require a 201 with a parsable location.
    pub async fn create(&self, resource_type: ResourceType, payload: &Value) -> Result<Created> {
        let response = self.post(resource_type, payload).await?;
        if response.status != StatusCode::CREATED {
            return Err(Error::UnexpectedStatus {
                expected: StatusCode::CREATED,
                actual: response.status,
                body: response.body,
            });
        }
        let location = response.location()?.to_string();
        let reference = RelativeReference::parse(&location)?;
        Ok(Created {
            response,
            location,
            reference,
        })
    }

    /// GET a resource instance by reference.
    pub async fn read(&self, reference: &RelativeReference) -> Result<FhirResponse> {
        self.read_url(&reference.to_string()).await
    }

    /// GET a resource instance by location (absolute or relative).
    pub async fn read_url(&self, location: &str) -> Result<FhirResponse> {
        self.dispatch(self.http.get(self.location_url(location)))
            .await
    }

    /// Type-level search with query parameters.
    pub async fn search(
        &self,
        resource_type: ResourceType,
        params: &[(&str, &str)],
    ) -> Result<FhirResponse> {
        self.dispatch(self.http.get(self.type_url(resource_type)).query(params))
            .await
    }

    /// DELETE a resource instance by reference.
    pub async fn delete(&self, reference: &RelativeReference) -> Result<FhirResponse> {
        self.delete_url(&reference.to_string()).await
    }

    /// DELETE a resource instance by location (absolute or relative).
    pub async fn delete_url(&self, location: &str) -> Result<FhirResponse> {
        self.dispatch(self.http.delete(self.location_url(location)))
            .await
    }

    /// POST a Bundle to the server's base endpoint.
    pub async fn submit_bundle(&self, bundle: &Value) -> Result<FhirResponse> {
        self.dispatch(self.http.post(&self.base).json(bundle)).await
    }
}
