//! The client facade and its document operations.
//!
//! [`Firestore`] holds the transport handle and the singular-name mapping.
//! Cloning it is cheap and every clone talks to the same transport.
//!
//! # Write semantics
//!
//! [`Firestore::set_doc`] picks its REST calls from the reference's
//! [`ResourceKind`]:
//!
//! | kind | exists | request |
//! |------|--------|---------|
//! | `SingleItem` `/c/id` | yes | `PATCH /c/id` with the data |
//! | `SingleItem` `/c/id` | no | `POST /c` with `id` injected |
//! | `NestedListItem` `/c/id/items/i` | yes | `PATCH /cItems/i` |
//! | `NestedListItem` `/c/id/items/i` | no | `POST /cItems` |
//! | `Malformed` `/c/id/x/i` | - | none, rejected with [`PathError`](crate::reference::PathError) |
//! | `Generic` | - | `PATCH` at the REST path |
//!
//! Nested list items get two injected fields: the parent foreign key
//! (`<singular(c)>Id = id`) and `id = i`.

use std::{fmt, sync::Arc};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    batch::{Batch, Operation},
    config::ClientConfig,
    naming::SingularNames,
    query::{Query, QueryConstraint, build_query},
    reference::{
        Reference, ResourceKind,
        path::{list_item_sibling_path, parent_path},
    },
    snapshot::Snapshot,
    transport::{Transport, TransportResult, http::HttpTransport},
};

/// Options accepted by [`Firestore::set_doc`].
///
/// Kept for call-site compatibility; writes always merge on the backend
/// (`PATCH`) or create (`POST`), whatever `merge` says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    pub merge: bool,
}

/// What [`Firestore::get_docs`] reads: a reference or a resolved query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsSource {
    Reference(Reference),
    Query(Query),
}

impl From<Reference> for DocsSource {
    fn from(reference: Reference) -> Self {
        DocsSource::Reference(reference)
    }
}

impl From<&Reference> for DocsSource {
    fn from(reference: &Reference) -> Self {
        DocsSource::Reference(reference.clone())
    }
}

impl From<Query> for DocsSource {
    fn from(query: Query) -> Self {
        DocsSource::Query(query)
    }
}

impl From<&Query> for DocsSource {
    fn from(query: &Query) -> Self {
        DocsSource::Query(query.clone())
    }
}

/// Client handle for a REST backend.
#[derive(Clone)]
pub struct Firestore {
    transport: Arc<dyn Transport>,
    singular_names: Arc<SingularNames>,
}

impl fmt::Debug for Firestore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Firestore")
            .field("transport", &self.transport.transport_type())
            .field("singular_names", &self.singular_names)
            .finish()
    }
}

impl Firestore {
    /// Create a client over an existing transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            singular_names: Arc::new(SingularNames::default()),
        }
    }

    /// Create an HTTP client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        info!(base_url = %transport.base_url(), "Created HTTP client");
        Ok(Self::new(Arc::new(transport)).with_singular_names(config.singular_names.clone()))
    }

    /// Use `names` to derive foreign-key fields for nested list items.
    pub fn with_singular_names(mut self, names: SingularNames) -> Self {
        self.singular_names = Arc::new(names);
        self
    }

    /// Replace the transport used by this handle.
    ///
    /// Clones made before the call keep the previous transport.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        debug!(transport = transport.transport_type(), "Replacing transport");
        self.transport = transport;
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn singular_names(&self) -> &SingularNames {
        &self.singular_names
    }

    /// Reference to a collection.
    pub fn collection<I, S>(&self, segments: I) -> Reference
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reference::new(segments)
    }

    /// Reference to a document.
    pub fn doc<I, S>(&self, segments: I) -> Reference
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reference::new(segments)
    }

    /// Start a new, empty batch bound to this client.
    pub fn write_batch(&self) -> Batch {
        Batch::new(self.clone())
    }

    /// Resolve a reference and constraints into a [`Query`].
    pub fn query(&self, reference: &Reference, constraints: &[QueryConstraint]) -> Result<Query> {
        Ok(build_query(reference, constraints)?)
    }

    /// Read a single reference.
    pub async fn get_doc(&self, reference: &Reference) -> Result<Snapshot> {
        let body = self.transport.get(reference.rest_path(), None).await?;
        Ok(Snapshot::new(body))
    }

    /// Read a collection reference or a resolved query.
    pub async fn get_docs(&self, source: impl Into<DocsSource>) -> Result<Snapshot> {
        let body = match source.into() {
            DocsSource::Reference(reference) => {
                self.transport.get(reference.rest_path(), None).await?
            }
            DocsSource::Query(query) => {
                self.transport
                    .get(query.path(), Some(query.query_string()))
                    .await?
            }
        };
        Ok(Snapshot::new(body))
    }

    /// Check whether `path` currently resolves on the backend.
    ///
    /// Any error status from the backend counts as "does not exist", not just
    /// 404. Only a missing answer (connection failure, timeout) is an error.
    pub async fn document_exists(&self, path: &str) -> Result<bool> {
        match self.transport.get(path, None).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_decode() => Ok(true),
            Err(err) if err.is_status() => {
                debug!(path, status = ?err.status_code(), "Treating error status as missing");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create or update the document at `reference`.
    pub async fn set_doc(
        &self,
        reference: &Reference,
        data: impl Serialize,
        _options: SetOptions,
    ) -> Result<Snapshot> {
        let data = serde_json::to_value(data)?;
        self.set_value(reference, data).await
    }

    /// Delete the document at `reference`.
    pub async fn delete_doc(&self, reference: &Reference) -> Result<Snapshot> {
        let body = self.transport.delete(reference.rest_path()).await?;
        Ok(Snapshot::new(body))
    }

    /// Create a document in the collection at `reference`.
    pub async fn add_doc(&self, reference: &Reference, data: impl Serialize) -> Result<Snapshot> {
        let data = serde_json::to_value(data)?;
        let body = self.transport.post(reference.rest_path(), &data).await?;
        Ok(Snapshot::new(body))
    }

    /// Run one queued batch operation.
    pub(crate) async fn apply(&self, operation: Operation) -> Result<Snapshot> {
        match operation {
            Operation::Set { reference, data } | Operation::Update { reference, data } => {
                self.set_value(&reference, data).await
            }
            Operation::Delete { reference } => self.delete_doc(&reference).await,
        }
    }

    pub(crate) async fn set_value(&self, reference: &Reference, data: Value) -> Result<Snapshot> {
        let path = reference.rest_path();
        match reference.kind() {
            ResourceKind::SingleItem { id, .. } => self.set_single_item(path, id, data).await,
            ResourceKind::NestedListItem {
                collection,
                id,
                item_id,
            } => {
                self.set_list_item(path, collection, id, item_id, data)
                    .await
            }
            ResourceKind::Malformed(err) => Err(err.clone().into()),
            ResourceKind::Generic => {
                let response = self.transport.patch(path, &data).await;
                Ok(Snapshot::new(log_write_failure(response)?))
            }
        }
    }

    async fn set_single_item(&self, path: &str, id: &str, data: Value) -> Result<Snapshot> {
        let response = if self.document_exists(path).await? {
            self.transport.patch(path, &data).await
        } else {
            let body = inject_fields(data, &[("id", id)])?;
            self.transport.post(&parent_path(path), &body).await
        };
        Ok(Snapshot::new(log_write_failure(response)?))
    }

    async fn set_list_item(
        &self,
        path: &str,
        collection: &str,
        id: &str,
        item_id: &str,
        data: Value,
    ) -> Result<Snapshot> {
        let sibling = list_item_sibling_path(path)?;
        let foreign_key = self.singular_names.foreign_key(collection)?;
        let body = inject_fields(data, &[(foreign_key.as_str(), id), ("id", item_id)])?;

        let response = if self.document_exists(&sibling).await? {
            self.transport.patch(&sibling, &body).await
        } else {
            self.transport.post(&parent_path(&sibling), &body).await
        };
        Ok(Snapshot::new(log_write_failure(response)?))
    }
}

fn log_write_failure(response: TransportResult<Value>) -> Result<Value> {
    response.map_err(|err| {
        warn!("{}", err.request_line());
        Error::from(err)
    })
}

/// Set string fields on an object payload, overwriting existing values.
fn inject_fields(data: Value, fields: &[(&str, &str)]) -> Result<Value> {
    let mut object = match data {
        Value::Object(object) => object,
        other => {
            return Err(Error::InvalidPayload {
                reason: format!("expected a JSON object to inject fields into, got {other}"),
            });
        }
    };
    for (name, value) in fields {
        object.insert((*name).to_string(), Value::String((*value).to_string()));
    }
    Ok(Value::Object(object))
}
