//! Query construction.
//!
//! This is not a query engine. A [`Query`] is only a resolved request
//! descriptor: a REST path plus a query string. Constraints are used for one
//! thing, selecting a singleton resource by the value of the first
//! constraint.

use thiserror::Error;

use crate::reference::{
    Reference, SINGLES_SEGMENT,
    path::{PathParts, items_collection_path},
};

/// Errors from building a query.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A singleton query was built without a constraint to select the resource.
    #[error("Query on '{path}' needs a constraint to select a singleton resource")]
    MissingConstraint { path: String },
}

impl From<QueryError> for crate::Error {
    fn from(err: QueryError) -> Self {
        crate::Error::Query(err)
    }
}

/// A `field sign value` triple as passed to `where`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConstraint {
    pub field: String,
    pub sign: String,
    pub value: String,
}

/// A resolved, ready-to-fetch request descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    path: String,
    query_string: String,
}

impl Query {
    pub fn new(path: impl Into<String>, query_string: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_string: query_string.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string sent with the request; empty means none.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }
}

/// Build a [`QueryConstraint`].
pub fn where_(
    field: impl Into<String>,
    sign: impl Into<String>,
    value: impl Into<String>,
) -> QueryConstraint {
    QueryConstraint {
        field: field.into(),
        sign: sign.into(),
        value: value.into(),
    }
}

/// Resolve a reference and its constraints into a [`Query`].
///
/// - A REST path containing a `singles` component selects the singleton named
///   by the first constraint's value: `/singles` + `where("id", "==", "42")`
///   resolves to `/42`.
/// - A three-component path ending in `items` resolves to the flat sibling
///   collection: `/orders/7/items` becomes `/ordersItems`. Other paths ending
///   in `items`, such as `/items` or `/a/b/c/items`, are not rewritten.
/// - Anything else is fetched at its REST path.
pub fn build_query(reference: &Reference, constraints: &[QueryConstraint]) -> Result<Query, QueryError> {
    let rest_path = reference.rest_path();
    let parts = PathParts::parse(rest_path);

    if parts.contains(SINGLES_SEGMENT) {
        let constraint = constraints
            .first()
            .ok_or_else(|| QueryError::MissingConstraint {
                path: rest_path.to_string(),
            })?;
        return Ok(Query::new(format!("/{}", constraint.value), ""));
    }

    if let Ok(path) = items_collection_path(rest_path) {
        return Ok(Query::new(path, ""));
    }

    Ok(Query::new(rest_path, ""))
}
