//! Error types for the transport layer.

use serde_json::Value;
use thiserror::Error;

use super::{Method, Request};

/// A failed transport call.
///
/// Every variant carries the request line (method, path and body) so callers
/// can log exactly what was attempted.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The backend answered with a non-2xx status.
    #[error("{method} {path} failed with status {status}: {message}")]
    Status {
        method: Method,
        path: String,
        body: Option<Value>,
        status: u16,
        message: String,
    },

    /// No response was received (connection refused, timeout, reset).
    #[error("{method} {path} failed: {reason}")]
    Connection {
        method: Method,
        path: String,
        body: Option<Value>,
        reason: String,
    },

    /// The backend answered with a 2xx status but the body was not JSON.
    #[error("{method} {path} returned an invalid body: {reason}")]
    Decode {
        method: Method,
        path: String,
        body: Option<Value>,
        reason: String,
    },
}

impl TransportError {
    /// Non-2xx answer to `request`.
    pub fn status(request: &Request, status: u16, message: impl Into<String>) -> Self {
        TransportError::Status {
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
            status,
            message: message.into(),
        }
    }

    /// No answer to `request`.
    pub fn connection(request: &Request, reason: impl Into<String>) -> Self {
        TransportError::Connection {
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
            reason: reason.into(),
        }
    }

    /// Unreadable answer to `request`.
    pub fn decode(request: &Request, reason: impl Into<String>) -> Self {
        TransportError::Decode {
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
            reason: reason.into(),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            TransportError::Status { method, .. }
            | TransportError::Connection { method, .. }
            | TransportError::Decode { method, .. } => *method,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TransportError::Status { path, .. }
            | TransportError::Connection { path, .. }
            | TransportError::Decode { path, .. } => path,
        }
    }

    /// The request body that was sent, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            TransportError::Status { body, .. }
            | TransportError::Connection { body, .. }
            | TransportError::Decode { body, .. } => body.as_ref(),
        }
    }

    /// HTTP status of the answer, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `METHOD path body`, space separated, for log lines.
    pub fn request_line(&self) -> String {
        let body = self.body().map(Value::to_string).unwrap_or_default();
        [self.method().as_str(), self.path(), body.as_str()].join(" ")
    }

    /// Check if the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::Status { status: 404, .. })
    }

    /// Check if the backend answered at all (with an error status).
    pub fn is_status(&self) -> bool {
        matches!(self, TransportError::Status { .. })
    }

    /// Check if no answer was received.
    pub fn is_connection(&self) -> bool {
        matches!(self, TransportError::Connection { .. })
    }

    /// Check if the answer could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, TransportError::Decode { .. })
    }
}

impl From<TransportError> for crate::Error {
    fn from(err: TransportError) -> Self {
        crate::Error::Transport(err)
    }
}
