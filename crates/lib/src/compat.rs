//! Free functions shaped like the document-database SDK call sites.
//!
//! Each function forwards to the matching [`Firestore`] method. The client
//! handle is passed explicitly instead of being carried by references.
//!
//! ```rust
//! use std::sync::Arc;
//! use docshim::{Firestore, compat::*, transport::memory::InMemoryTransport};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> docshim::Result<()> {
//! let db = Firestore::new(Arc::new(InMemoryTransport::new()));
//! add_doc(&db, &collection(&db, ["notes"]), json!({"text": "hi"})).await?;
//!
//! let snapshot = get_docs(&db, &collection(&db, ["notes"])).await?;
//! assert_eq!(snapshot.docs().len(), 1);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::{
    Result,
    batch::Batch,
    firestore::{DocsSource, Firestore, SetOptions},
    query::{Query, QueryConstraint},
    reference::Reference,
    snapshot::Snapshot,
};

pub use crate::query::where_;

pub fn collection<I, S>(db: &Firestore, segments: I) -> Reference
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    db.collection(segments)
}

pub fn doc<I, S>(db: &Firestore, segments: I) -> Reference
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    db.doc(segments)
}

pub async fn get_doc(db: &Firestore, reference: &Reference) -> Result<Snapshot> {
    db.get_doc(reference).await
}

pub async fn get_docs(db: &Firestore, source: impl Into<DocsSource>) -> Result<Snapshot> {
    db.get_docs(source).await
}

pub async fn set_doc(
    db: &Firestore,
    reference: &Reference,
    data: impl Serialize,
    options: SetOptions,
) -> Result<Snapshot> {
    db.set_doc(reference, data, options).await
}

pub async fn delete_doc(db: &Firestore, reference: &Reference) -> Result<Snapshot> {
    db.delete_doc(reference).await
}

pub async fn add_doc(db: &Firestore, reference: &Reference, data: impl Serialize) -> Result<Snapshot> {
    db.add_doc(reference, data).await
}

pub fn write_batch(db: &Firestore) -> Batch {
    db.write_batch()
}

pub fn query(db: &Firestore, reference: &Reference, constraints: &[QueryConstraint]) -> Result<Query> {
    db.query(reference, constraints)
}
