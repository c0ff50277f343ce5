//!
//! docshim: a document-database style client API over a plain REST backend.
//!
//! Application code written against a document-store SDK (collections,
//! documents, snapshots, batched writes) can use this crate instead and talk
//! to a `json-server` style HTTP API without reshaping its call sites.
//!
//! ## Core Concepts
//!
//! * **References (`reference::Reference`)**: immutable segment paths such as
//!   `["orders", "7"]`, rendered as REST paths (`/orders/7`) and classified
//!   into a `reference::ResourceKind`.
//! * **Client (`Firestore`)**: the facade holding the transport handle. All
//!   document operations (`get_doc`, `set_doc`, `delete_doc`, ...) live here.
//! * **Snapshots (`snapshot::Snapshot`)**: wrappers over response bodies, with
//!   per-element `snapshot::Document`s for collection reads.
//! * **Batches (`batch::Batch`)**: queued writes committed concurrently, with
//!   one result per operation.
//! * **Transports (`transport::Transport`)**: the pluggable HTTP layer, with a
//!   reqwest implementation and an in-memory backend.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docshim::{Firestore, SetOptions, transport::memory::InMemoryTransport};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> docshim::Result<()> {
//! let db = Firestore::new(Arc::new(InMemoryTransport::new()));
//!
//! let order = db.doc(["orders", "7"]);
//! db.set_doc(&order, json!({"total": 12}), SetOptions::default()).await?;
//!
//! let snapshot = db.get_doc(&order).await?;
//! assert_eq!(snapshot.data()["total"], 12);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod batch;
pub mod compat;
pub mod config;
pub mod firestore;
pub mod naming;
pub mod query;
pub mod reference;
pub mod snapshot;
pub mod transport;

pub use app::{App, get_firestore, init, initialize_app};
pub use batch::{Batch, BatchOutcome, Operation};
pub use config::ClientConfig;
pub use firestore::{DocsSource, Firestore, SetOptions};
pub use query::{Query, QueryConstraint, build_query, where_};
pub use reference::{Reference, ResourceKind};
pub use snapshot::{Document, Snapshot};

/// Result type used throughout the docshim library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the docshim library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured transport errors from the transport module
    #[error(transparent)]
    Transport(transport::TransportError),

    /// Structured path shape errors from the reference module
    #[error(transparent)]
    Path(reference::PathError),

    /// Structured naming errors from the naming module
    #[error(transparent)]
    Naming(naming::NamingError),

    /// Structured query errors from the query module
    #[error(transparent)]
    Query(query::QueryError),

    /// Structured batch errors from the batch module
    #[error(transparent)]
    Batch(batch::BatchError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),

    /// A payload could not be used for the requested write.
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Transport(_) => "transport",
            Error::Path(_) => "reference",
            Error::Naming(_) => "naming",
            Error::Query(_) => "query",
            Error::Batch(_) => "batch",
            Error::Config(_) => "config",
            Error::InvalidPayload { .. } => "firestore",
        }
    }

    /// The underlying transport error, if this is one.
    pub fn transport_error(&self) -> Option<&transport::TransportError> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }

    /// Check if the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Transport(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error came from the transport layer.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if the backend could not be reached at all.
    pub fn is_connection_error(&self) -> bool {
        match self {
            Error::Transport(err) => err.is_connection(),
            _ => false,
        }
    }

    /// Check if this error is caused by the shape of a reference or payload
    /// rather than by the backend.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::Path(_) | Error::Naming(_) | Error::Query(_) | Error::InvalidPayload { .. }
        )
    }

    /// Check if this error is configuration-related.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if a batch task failed to run to completion.
    pub fn is_batch_error(&self) -> bool {
        matches!(self, Error::Batch(_))
    }
}
