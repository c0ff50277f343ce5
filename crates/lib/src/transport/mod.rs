//! Transport abstraction for talking to the REST backend.
//!
//! The document operations never build URLs or touch HTTP directly; they
//! issue [`Request`]s through a [`Transport`]. Two implementations ship with
//! the crate:
//!
//! - [`http::HttpTransport`]: a reqwest client bound to a base URL.
//! - [`memory::InMemoryTransport`]: an in-process backend with json-server
//!   semantics that also records every request it receives.
//!
//! Any non-2xx answer must be returned as a [`TransportError`].

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

pub mod errors;
pub mod http;
pub mod memory;

pub use errors::TransportError;

/// Result type for transport calls.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// HTTP verbs used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Absolute REST path, e.g. `/orders/7`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a query string. Empty strings (and a lone `?`) mean no query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.strip_prefix('?').unwrap_or(&query);
        self.query = (!query.is_empty()).then(|| query.to_string());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A client for the REST backend.
///
/// Implementations only need [`Transport::send`]; the per-verb helpers are
/// provided on top of it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short identifier used in logs (e.g. "http", "memory").
    fn transport_type(&self) -> &'static str;

    /// Issue a request and return the decoded JSON body.
    ///
    /// Empty bodies decode to [`Value::Null`]. Non-2xx answers are errors.
    async fn send(&self, request: Request) -> TransportResult<Value>;

    /// GET `path`, with an optional query string.
    async fn get(&self, path: &str, query: Option<&str>) -> TransportResult<Value> {
        let mut request = Request::get(path);
        if let Some(query) = query {
            request = request.with_query(query);
        }
        self.send(request).await
    }

    async fn post(&self, path: &str, body: &Value) -> TransportResult<Value> {
        self.send(Request::post(path, body.clone())).await
    }

    async fn patch(&self, path: &str, body: &Value) -> TransportResult<Value> {
        self.send(Request::patch(path, body.clone())).await
    }

    async fn put(&self, path: &str, body: &Value) -> TransportResult<Value> {
        self.send(Request::put(path, body.clone())).await
    }

    async fn delete(&self, path: &str) -> TransportResult<Value> {
        self.send(Request::delete(path)).await
    }
}
