//! In-process REST backend.
//!
//! [`InMemoryTransport`] answers requests the way a `json-server` style
//! backend does, against a JSON document held in memory:
//!
//! - Each top-level key is a resource. Arrays are collections whose records
//!   are addressed by their `id` field; objects are singletons.
//! - `GET /res` returns the resource, `GET /res/id` one record. Collection
//!   reads accept `field=value` query pairs as equality filters.
//! - `POST /res` appends a record (assigning a numeric id when none is given)
//!   or replaces a singleton.
//! - `PATCH` merges top-level fields, `PUT` replaces; both keep the id.
//! - `DELETE /res/id` removes a record.
//! - Anything missing answers 404.
//!
//! Every request is recorded before it is answered, so tests can assert on
//! exactly what a document operation sent.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Method, Request, Transport, TransportError, TransportResult};
use crate::reference::path::PathParts;

#[derive(Debug, Default)]
struct State {
    db: Map<String, Value>,
    requests: Vec<Request>,
}

/// In-memory REST backend that records requests.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    state: Mutex<State>,
}

impl InMemoryTransport {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend seeded with `db`, which must be a JSON object.
    pub fn from_json(db: Value) -> Option<Self> {
        match db {
            Value::Object(db) => Some(Self {
                state: Mutex::new(State {
                    db,
                    requests: Vec::new(),
                }),
            }),
            _ => None,
        }
    }

    /// Copy of the whole backing document.
    pub fn dump(&self) -> Value {
        Value::Object(self.lock().db.clone())
    }

    /// A top-level resource, if present.
    pub fn resource(&self, name: &str) -> Option<Value> {
        self.lock().db.get(name).cloned()
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// Requests received with the given method.
    pub fn requests_with(&self, method: Method) -> Vec<Request> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // recover from poisoning
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    fn transport_type(&self) -> &'static str {
        "memory"
    }

    async fn send(&self, request: Request) -> TransportResult<Value> {
        debug!(method = %request.method, path = %request.path, "Handling in-memory request");
        let mut state = self.lock();
        state.requests.push(request.clone());
        handle(&mut state.db, &request)
    }
}

fn not_found(request: &Request) -> TransportError {
    TransportError::status(request, 404, "Not Found")
}

fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

fn handle(db: &mut Map<String, Value>, request: &Request) -> TransportResult<Value> {
    let parts = PathParts::parse(&request.path);
    match (request.method, parts.components()) {
        (Method::Get, []) => Ok(Value::Object(db.clone())),
        (Method::Get, [name]) => {
            let resource = db.get(name).ok_or_else(|| not_found(request))?;
            Ok(filter(resource, request.query.as_deref()))
        }
        (Method::Get, [name, id]) => find_record(db, name, id)
            .cloned()
            .ok_or_else(|| not_found(request)),
        (Method::Post, [name]) => {
            let body = object_body(request)?;
            insert(db, name, body, request)
        }
        (Method::Patch | Method::Put, [name]) => {
            let body = object_body(request)?;
            match db.get_mut(name) {
                Some(Value::Object(existing)) => {
                    if request.method == Method::Put {
                        existing.clear();
                    }
                    existing.extend(body);
                    Ok(Value::Object(existing.clone()))
                }
                _ => Err(not_found(request)),
            }
        }
        (Method::Patch | Method::Put, [name, id]) => {
            let body = object_body(request)?;
            let record = find_record_mut(db, name, id).ok_or_else(|| not_found(request))?;
            let Value::Object(existing) = record else {
                return Err(not_found(request));
            };
            let original_id = existing.get("id").cloned();
            if request.method == Method::Put {
                existing.clear();
            }
            existing.extend(body);
            if let Some(original_id) = original_id {
                existing.insert("id".to_string(), original_id);
            }
            Ok(Value::Object(existing.clone()))
        }
        (Method::Delete, [name, id]) => {
            let Some(Value::Array(records)) = db.get_mut(name) else {
                return Err(not_found(request));
            };
            let index = records
                .iter()
                .position(|r| id_matches(r, id))
                .ok_or_else(|| not_found(request))?;
            records.remove(index);
            Ok(Value::Object(Map::new()))
        }
        _ => Err(not_found(request)),
    }
}

fn object_body(request: &Request) -> TransportResult<Map<String, Value>> {
    match &request.body {
        Some(Value::Object(body)) => Ok(body.clone()),
        _ => Err(TransportError::status(
            request,
            400,
            "Request body must be a JSON object",
        )),
    }
}

fn find_record<'a>(db: &'a Map<String, Value>, name: &str, id: &str) -> Option<&'a Value> {
    match db.get(name) {
        Some(Value::Array(records)) => records.iter().find(|r| id_matches(r, id)),
        _ => None,
    }
}

fn find_record_mut<'a>(
    db: &'a mut Map<String, Value>,
    name: &str,
    id: &str,
) -> Option<&'a mut Value> {
    match db.get_mut(name) {
        Some(Value::Array(records)) => records.iter_mut().find(|r| id_matches(r, id)),
        _ => None,
    }
}

fn insert(
    db: &mut Map<String, Value>,
    name: &str,
    mut body: Map<String, Value>,
    request: &Request,
) -> TransportResult<Value> {
    let resource = db
        .entry(name.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    let records = match resource {
        Value::Array(records) => records,
        singleton => {
            *singleton = Value::Object(body);
            return Ok(singleton.clone());
        }
    };

    match body.get("id") {
        Some(id) => {
            let id = match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if records.iter().any(|r| id_matches(r, &id)) {
                return Err(TransportError::status(
                    request,
                    409,
                    format!("Duplicate id '{id}'"),
                ));
            }
        }
        None => {
            let next = records
                .iter()
                .filter_map(|r| r.get("id").and_then(Value::as_u64))
                .max()
                .map_or(1, |max| max + 1);
            body.insert("id".to_string(), Value::from(next));
        }
    }

    let record = Value::Object(body);
    records.push(record.clone());
    Ok(record)
}

fn filter(resource: &Value, query: Option<&str>) -> Value {
    let (Value::Array(records), Some(query)) = (resource, query) else {
        return resource.clone();
    };
    let pairs: Vec<(&str, &str)> = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect();
    let matching = records
        .iter()
        .filter(|record| {
            pairs.iter().all(|(field, value)| match record.get(*field) {
                Some(Value::String(s)) => s == *value,
                Some(other) => other.to_string() == *value,
                None => false,
            })
        })
        .cloned()
        .collect();
    Value::Array(matching)
}
