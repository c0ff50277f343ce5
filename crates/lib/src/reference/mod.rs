//! Document and collection references.
//!
//! A [`Reference`] is an immutable, ordered list of path segments, the same
//! thing a document-database SDK builds with `collection(db, ...)` or
//! `doc(db, ...)`. It knows how to render itself as a REST path and what kind
//! of REST resource that path addresses.
//!
//! # Singletons
//!
//! References whose first segment is the literal `singles` address top-level
//! named resources. The `singles/` prefix is dropped from the REST path, so
//! `["singles", "settings"]` resolves to `/settings`.
//!
//! # Example
//!
//! ```rust
//! use docshim::reference::{Reference, ResourceKind};
//!
//! let item = Reference::from(["orders", "7"]);
//! assert_eq!(item.rest_path(), "/orders/7");
//! assert_eq!(item.dotted_path(), "orders.7");
//! assert!(matches!(item.kind(), ResourceKind::SingleItem { .. }));
//!
//! let single = Reference::from(["singles", "settings"]);
//! assert_eq!(single.rest_path(), "/settings");
//! assert_eq!(single.kind(), &ResourceKind::Generic);
//! ```

use std::fmt;

pub mod errors;
pub mod path;

pub use errors::PathError;
use path::PathParts;

/// First segment marking a singleton resource.
pub const SINGLES_SEGMENT: &str = "singles";

/// The REST resource shape a [`Reference`] addresses.
///
/// Computed once when the reference is built and carried with it, so write
/// operations never re-derive semantics from the path length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    /// `/<collection>/<id>`: a document inside a top-level collection.
    SingleItem { collection: String, id: String },
    /// `/<collection>/<id>/items/<itemId>`: an entry of a document's nested
    /// list, stored in the flat `<collection>Items` sibling collection.
    NestedListItem {
        collection: String,
        id: String,
        item_id: String,
    },
    /// Four components without `items` in third place. Writes reject it.
    Malformed(PathError),
    /// Any other shape; used as-is.
    Generic,
}

impl ResourceKind {
    /// Classify a REST path.
    pub fn of_rest_path(rest_path: &str) -> Self {
        let parts = PathParts::parse(rest_path);
        if parts.is_single_item() {
            let components = parts.components();
            return ResourceKind::SingleItem {
                collection: components[0].clone(),
                id: components[1].clone(),
            };
        }
        let list_item_length = parts.len() == 4;
        match parts.into_list_item() {
            Ok(item) => ResourceKind::NestedListItem {
                collection: item.node_name,
                id: item.id,
                item_id: item.item_id,
            },
            Err(err) if list_item_length => ResourceKind::Malformed(err),
            Err(_) => ResourceKind::Generic,
        }
    }

    /// Short name used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::SingleItem { .. } => "single-item",
            ResourceKind::NestedListItem { .. } => "nested-list-item",
            ResourceKind::Malformed(_) => "malformed",
            ResourceKind::Generic => "generic",
        }
    }
}

/// An immutable hierarchical path to a document or collection.
///
/// Segments are not validated or escaped; callers are responsible for using
/// characters that are safe inside a URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    segments: Vec<String>,
    rest_path: String,
    kind: ResourceKind,
}

impl Reference {
    /// Build a reference from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let rest_path = rest_path_of(&segments);
        let kind = ResourceKind::of_rest_path(&rest_path);
        Self {
            segments,
            rest_path,
            kind,
        }
    }

    /// The raw segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The REST path, e.g. `/orders/7`, with a leading `singles/` elided.
    pub fn rest_path(&self) -> &str {
        &self.rest_path
    }

    /// Segments joined by `.`; an opaque display string, never parsed back.
    pub fn dotted_path(&self) -> String {
        self.segments.join(".")
    }

    /// The resource shape this reference addresses.
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    /// The last segment, which is the document id for document references.
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Whether this reference addresses a singleton resource.
    pub fn is_singleton(&self) -> bool {
        self.segments.first().map(String::as_str) == Some(SINGLES_SEGMENT)
    }
}

fn rest_path_of(segments: &[String]) -> String {
    let joined = segments.join("/");
    let trimmed = joined
        .strip_prefix(SINGLES_SEGMENT)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(&joined);
    format!("/{trimmed}")
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted_path())
    }
}

impl<const N: usize> From<[&str; N]> for Reference {
    fn from(segments: [&str; N]) -> Self {
        Reference::new(segments)
    }
}

impl From<&[&str]> for Reference {
    fn from(segments: &[&str]) -> Self {
        Reference::new(segments.iter().copied())
    }
}

impl From<Vec<String>> for Reference {
    fn from(segments: Vec<String>) -> Self {
        Reference::new(segments)
    }
}
