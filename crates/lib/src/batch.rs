//! Batched writes.
//!
//! A [`Batch`] queues set, update and delete operations without touching the
//! backend. [`Batch::commit`] then runs every queued operation concurrently
//! and returns one result per operation, in the order they were queued.
//!
//! There is no atomicity: a failed operation does not stop or roll back the
//! others, and each operation is attempted exactly once.
//!
//! ```rust
//! use std::sync::Arc;
//! use docshim::{Firestore, transport::memory::InMemoryTransport};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let db = Firestore::new(Arc::new(InMemoryTransport::new()));
//! let mut batch = db.write_batch();
//! batch
//!     .set(&db.doc(["orders", "1"]), json!({"total": 5}))
//!     .delete(&db.doc(["orders", "2"]));
//!
//! let outcome = batch.commit().await;
//! assert_eq!(outcome.len(), 2);
//! // orders/2 never existed
//! assert_eq!(outcome.failures().count(), 1);
//! # }
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::info;

use crate::{Error, Result, firestore::Firestore, reference::Reference, snapshot::Snapshot};

/// Errors from running a batch.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The task running an operation panicked or was cancelled.
    #[error("Batch operation {index} did not complete: {reason}")]
    TaskFailed { index: usize, reason: String },
}

impl From<BatchError> for crate::Error {
    fn from(err: BatchError) -> Self {
        crate::Error::Batch(err)
    }
}

/// A queued write.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Set { reference: Reference, data: Value },
    Update { reference: Reference, data: Value },
    Delete { reference: Reference },
}

impl Operation {
    pub fn reference(&self) -> &Reference {
        match self {
            Operation::Set { reference, .. }
            | Operation::Update { reference, .. }
            | Operation::Delete { reference } => reference,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Set { .. } => "set",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
        }
    }
}

/// An ordered queue of writes bound to a client.
#[derive(Debug)]
pub struct Batch {
    db: Firestore,
    operations: Vec<Operation>,
}

impl Batch {
    pub fn new(db: Firestore) -> Self {
        Self {
            db,
            operations: Vec::new(),
        }
    }

    /// Queue a create-or-update of `reference`.
    pub fn set(&mut self, reference: &Reference, data: Value) -> &mut Self {
        self.operations.push(Operation::Set {
            reference: reference.clone(),
            data,
        });
        self
    }

    /// Queue an update of `reference`. Runs exactly like [`Batch::set`].
    pub fn update(&mut self, reference: &Reference, data: Value) -> &mut Self {
        self.operations.push(Operation::Update {
            reference: reference.clone(),
            data,
        });
        self
    }

    /// Queue a delete of `reference`.
    pub fn delete(&mut self, reference: &Reference) -> &mut Self {
        self.operations.push(Operation::Delete {
            reference: reference.clone(),
        });
        self
    }

    /// The queued operations, in order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Run every queued operation concurrently and wait for all of them.
    ///
    /// Consumes the batch. The outcome holds one result per operation in
    /// queue order, whether it succeeded or not.
    pub async fn commit(self) -> BatchOutcome {
        let total = self.operations.len();
        let mut set = JoinSet::new();
        let mut task_index = HashMap::with_capacity(total);

        for (index, operation) in self.operations.into_iter().enumerate() {
            let db = self.db.clone();
            let handle = set.spawn(async move { (index, db.apply(operation).await) });
            task_index.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<Result<Snapshot>>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    if let Some(&index) = task_index.get(&e.id()) {
                        slots[index] = Some(Err(BatchError::TaskFailed {
                            index,
                            reason: e.to_string(),
                        }
                        .into()));
                    }
                }
            }
        }

        let results: Vec<Result<Snapshot>> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(BatchError::TaskFailed {
                        index,
                        reason: "no result reported".to_string(),
                    }
                    .into())
                })
            })
            .collect();

        let outcome = BatchOutcome { results };
        info!(
            operations = total,
            failed = outcome.failures().count(),
            "Batch committed"
        );
        outcome
    }
}

/// Per-operation results of a committed batch.
#[derive(Debug)]
pub struct BatchOutcome {
    results: Vec<Result<Snapshot>>,
}

impl BatchOutcome {
    /// Results in queue order.
    pub fn results(&self) -> &[Result<Snapshot>] {
        &self.results
    }

    pub fn into_results(self) -> Vec<Result<Snapshot>> {
        self.results
    }

    /// Failed operations with their queue index.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(index, result)| result.as_ref().err().map(|e| (index, e)))
    }

    /// Whether every operation succeeded.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.is_ok())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All snapshots, or the first error in queue order.
    pub fn into_result(self) -> Result<Vec<Snapshot>> {
        self.results.into_iter().collect()
    }
}
