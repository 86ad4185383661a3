//! In-process stub FHIR server for integration tests.
//!
//! Implements just enough of the REST surface the toolkit exercises:
//! create with a location header, duplicate-Device rejection, read, delete,
//! searchset Bundles with the handful of filters the checks use, batch
//! Bundle submission, and `/metadata`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::DateTime;
use serde_json::{json, Value};

pub struct StubServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Stub {
    base_url: String,
    next_id: AtomicU64,
    // type -> id -> resource
    store: Mutex<HashMap<String, HashMap<String, Value>>>,
}

/// Bind an ephemeral port and serve the stub until the returned handle is
/// dropped.
pub async fn spawn() -> StubServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let stub = Arc::new(Stub {
        base_url: base_url.clone(),
        next_id: AtomicU64::new(1),
        store: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/", post(submit_bundle))
        .route("/metadata", get(metadata))
        .route("/:rtype", post(create).get(search))
        .route("/:rtype/:id", get(read).delete(delete_resource))
        .with_state(stub);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer { base_url, handle }
}

fn operation_outcome(message: &str) -> Value {
    json!({
        "resourceType": "OperationOutcome",
        "issue": [{ "severity": "error", "code": "processing", "diagnostics": message }],
    })
}

/// Store a resource, enforcing the stub's two validation rules: the payload
/// must name the endpoint's resource type, and Device identifiers are
/// unique.
fn insert(stub: &Stub, rtype: &str, mut payload: Value) -> Result<(String, Value), Response> {
    if payload["resourceType"].as_str() != Some(rtype) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(operation_outcome("resourceType does not match endpoint")),
        )
            .into_response());
    }

    let mut store = stub.store.lock().unwrap();
    if rtype == "Device" {
        if let Some(identifier) = payload["distinctIdentifier"].as_str() {
            let duplicate = store
                .get("Device")
                .map(|devices| {
                    devices
                        .values()
                        .any(|d| d["distinctIdentifier"].as_str() == Some(identifier))
                })
                .unwrap_or(false);
            if duplicate {
                return Err((
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(operation_outcome("duplicate distinctIdentifier")),
                )
                    .into_response());
            }
        }
    }

    let id = stub.next_id.fetch_add(1, Ordering::Relaxed).to_string();
    payload["id"] = json!(id);
    store
        .entry(rtype.to_string())
        .or_default()
        .insert(id.clone(), payload.clone());
    Ok((id, payload))
}

async fn create(
    State(stub): State<Arc<Stub>>,
    Path(rtype): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    match insert(&stub, &rtype, payload) {
        Ok((id, stored)) => {
            let location = format!("{}/{}/{}", stub.base_url, rtype, id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(stored),
            )
                .into_response()
        }
        Err(response) => response,
    }
}

async fn read(State(stub): State<Arc<Stub>>, Path((rtype, id)): Path<(String, String)>) -> Response {
    let store = stub.store.lock().unwrap();
    match store.get(&rtype).and_then(|resources| resources.get(&id)) {
        Some(resource) => (StatusCode::OK, Json(resource.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(operation_outcome("resource not found")),
        )
            .into_response(),
    }
}

async fn delete_resource(
    State(stub): State<Arc<Stub>>,
    Path((rtype, id)): Path<(String, String)>,
) -> Response {
    let mut store = stub.store.lock().unwrap();
    let removed = store
        .get_mut(&rtype)
        .and_then(|resources| resources.remove(&id));
    match removed {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(operation_outcome("resource not found")),
        )
            .into_response(),
    }
}

async fn search(
    State(stub): State<Arc<Stub>>,
    Path(rtype): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let store = stub.store.lock().unwrap();
    let entries: Vec<Value> = store
        .get(&rtype)
        .map(|resources| {
            resources
                .values()
                .filter(|resource| matches_params(resource, &params))
                .map(|resource| json!({ "resource": resource }))
                .collect()
        })
        .unwrap_or_default();

    (
        StatusCode::OK,
        Json(json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "entry": entries,
        })),
    )
        .into_response()
}

fn matches_params(resource: &Value, params: &HashMap<String, String>) -> bool {
    params.iter().all(|(name, value)| match name.as_str() {
        "identifier" => resource["identifier"]["value"].as_str() == Some(value),
        "subject" => resource["subject"]["reference"].as_str() == Some(value),
        "category" => resource["category"]
            .as_array()
            .map(|categories| {
                categories.iter().any(|category| {
                    category["coding"]
                        .as_array()
                        .map(|codings| {
                            codings.iter().any(|c| c["code"].as_str() == Some(value))
                        })
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false),
        "date" => date_matches(resource, value),
        _ => true,
    })
}

fn date_matches(resource: &Value, param: &str) -> bool {
    // Only the `ge` prefix is used by the checks.
    let Some(bound) = param.strip_prefix("ge") else {
        return true;
    };
    let Some(instant) = resource["effectiveInstant"].as_str() else {
        return false;
    };
    let Ok(instant) = DateTime::parse_from_rfc3339(instant) else {
        return false;
    };
    let Ok(bound) = chrono::NaiveDate::parse_from_str(bound, "%Y-%m-%d") else {
        return false;
    };
    instant.date_naive() >= bound
}

async fn metadata() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "resourceType": "CapabilityStatement",
            "status": "active",
            "kind": "instance",
            "fhirVersion": "4.0.1",
        })),
    )
        .into_response()
}

async fn submit_bundle(State(stub): State<Arc<Stub>>, Json(bundle): Json<Value>) -> Response {
    if bundle["resourceType"].as_str() != Some("Bundle") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(operation_outcome("expected a Bundle")),
        )
            .into_response();
    }

    let entries = bundle["entry"].as_array().cloned().unwrap_or_default();
    let mut responses = Vec::new();
    for entry in entries {
        let resource = entry["resource"].clone();
        let rtype = resource["resourceType"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        match insert(&stub, &rtype, resource) {
            Ok((id, _)) => responses.push(json!({
                "response": {
                    "status": "201 Created",
                    "location": format!("{rtype}/{id}"),
                }
            })),
            Err(_) => responses.push(json!({
                "response": { "status": "422 Unprocessable Entity" }
            })),
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "resourceType": "Bundle",
            "type": "batch-response",
            "entry": responses,
        })),
    )
        .into_response()
}
