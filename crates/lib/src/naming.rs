//! Foreign-key field naming for nested list items.
//!
//! When a nested list item is written to its flat sibling collection, the
//! record gets a field pointing back at its parent document. The field name
//! is the singular form of the parent collection followed by `Id`, so an item
//! under `/orders/7` is stored with `orderId: "7"`.
//!
//! Singular forms are never guessed from English spelling; each collection
//! that owns nested lists must be registered.
//!
//! ```rust
//! use docshim::naming::SingularNames;
//!
//! let names = SingularNames::new()
//!     .with("orders", "order")
//!     .with("boxes", "box");
//! assert_eq!(names.foreign_key("orders")?, "orderId");
//! assert!(names.foreign_key("people").is_err());
//! # Ok::<(), docshim::naming::NamingError>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix appended to the singular name to form the foreign-key field.
pub const FOREIGN_KEY_SUFFIX: &str = "Id";

/// Errors from singular-name lookup.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamingError {
    /// No singular form registered for the collection.
    #[error("No singular name registered for collection '{collection}'")]
    UnknownCollection { collection: String },
}

impl NamingError {
    pub fn is_unknown_collection(&self) -> bool {
        matches!(self, NamingError::UnknownCollection { .. })
    }
}

impl From<NamingError> for crate::Error {
    fn from(err: NamingError) -> Self {
        crate::Error::Naming(err)
    }
}

/// Explicit plural collection name to singular name mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SingularNames {
    names: HashMap<String, String>,
}

impl SingularNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `singular` as the singular form of `plural`.
    pub fn with(mut self, plural: impl Into<String>, singular: impl Into<String>) -> Self {
        self.insert(plural, singular);
        self
    }

    pub fn insert(&mut self, plural: impl Into<String>, singular: impl Into<String>) {
        self.names.insert(plural.into(), singular.into());
    }

    /// The registered singular form of `plural`.
    pub fn singular(&self, plural: &str) -> Result<&str, NamingError> {
        self.names
            .get(plural)
            .map(String::as_str)
            .ok_or_else(|| NamingError::UnknownCollection {
                collection: plural.to_string(),
            })
    }

    /// The foreign-key field name for items nested under `plural`.
    pub fn foreign_key(&self, plural: &str) -> Result<String, NamingError> {
        Ok(format!("{}{FOREIGN_KEY_SUFFIX}", self.singular(plural)?))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<P, S> FromIterator<(P, S)> for SingularNames
where
    P: Into<String>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (P, S)>>(iter: T) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(p, s)| (p.into(), s.into()))
                .collect(),
        }
    }
}
