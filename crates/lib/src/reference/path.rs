//! REST path resolution helpers.
//!
//! All helpers here operate on an already resolved REST path string such as
//! `/orders/7/items/3`, never on a [`Reference`](super::Reference) directly.
//!
//! The backend stores nested list items in a flat sibling collection: the
//! items of `/orders/7` live in `/ordersItems`, and `/orders/7/items/3` is
//! really `/ordersItems/3`.
//!
//! # Examples
//!
//! ```rust
//! use docshim::reference::path::{PathParts, list_item_sibling_path, parent_path};
//!
//! assert_eq!(parent_path("/orders/7"), "/orders");
//! assert_eq!(list_item_sibling_path("/orders/7/items/3")?, "/ordersItems/3");
//!
//! let parts = PathParts::parse("/orders/7/items/3");
//! assert_eq!(parts.node_name(), Some("orders"));
//! assert_eq!(parts.item_id(), Some("3"));
//! # Ok::<(), docshim::reference::PathError>(())
//! ```

use super::errors::PathError;

/// Fixed segment naming the nested list of a document.
pub const LIST_ITEMS_SEGMENT: &str = "items";

/// Suffix appended to a node name to form its sibling list-item collection.
pub const SIBLING_COLLECTION_SUFFIX: &str = "Items";

/// Drop the last `/`-delimited segment of a path.
///
/// `/orders/7` becomes `/orders`, and a single-segment path such as
/// `/orders` becomes the empty string.
pub fn parent_path(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// Name of the flat collection holding the list items of `node_name`.
pub fn sibling_collection_name(node_name: &str) -> String {
    format!("{node_name}{SIBLING_COLLECTION_SUFFIX}")
}

/// Rewrite `/<node>/<id>/items/<itemId>` to `/<node>Items/<itemId>`.
pub fn list_item_sibling_path(path: &str) -> Result<String, PathError> {
    let item = PathParts::parse(path).into_list_item()?;
    Ok(format!(
        "/{}/{}",
        sibling_collection_name(&item.node_name),
        item.item_id
    ))
}

/// Rewrite `/<node>/<id>/items` to `/<node>Items`.
pub fn items_collection_path(path: &str) -> Result<String, PathError> {
    let parts = PathParts::parse(path);
    if !parts.is_items_collection() {
        return Err(PathError::UnexpectedShape {
            path: path.to_string(),
            expected: "/<node>/<id>/items",
        });
    }
    // is_items_collection guarantees a first component
    let node_name = parts.node_name().unwrap_or_default();
    Ok(format!("/{}", sibling_collection_name(node_name)))
}

/// A REST path split into its `/`-separated components.
///
/// The leading slash is dropped; empty components in the middle of the path
/// are kept as-is so the component count always matches the path text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    path: String,
    components: Vec<String>,
}

/// The named parts of a `/<node>/<id>/items/<itemId>` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemParts {
    pub node_name: String,
    pub id: String,
    pub item_id: String,
}

impl PathParts {
    /// Split a REST path into components.
    pub fn parse(path: &str) -> Self {
        let rest = path.strip_prefix('/').unwrap_or(path);
        let components = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').map(str::to_string).collect()
        };
        Self {
            path: path.to_string(),
            components,
        }
    }

    /// The path this was parsed from.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// All components in order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// First component: the top-level collection or resource name.
    pub fn node_name(&self) -> Option<&str> {
        self.component(0)
    }

    /// Second component: the document id inside the top-level collection.
    pub fn id(&self) -> Option<&str> {
        self.component(1)
    }

    /// Fourth component: the id of a nested list item.
    pub fn item_id(&self) -> Option<&str> {
        self.component(3)
    }

    /// Last component, if any.
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// `/<collection>/<id>`
    pub fn is_single_item(&self) -> bool {
        self.len() == 2
    }

    /// `/<node>/<id>/items/<itemId>`
    pub fn is_list_item(&self) -> bool {
        self.len() == 4 && self.components[2] == LIST_ITEMS_SEGMENT
    }

    /// `/<node>/<id>/items`
    pub fn is_items_collection(&self) -> bool {
        self.len() == 3 && self.components[2] == LIST_ITEMS_SEGMENT
    }

    /// Whether any component equals `segment`.
    pub fn contains(&self, segment: &str) -> bool {
        self.components.iter().any(|c| c == segment)
    }

    /// Validate the list-item shape and extract its named parts.
    pub fn into_list_item(self) -> Result<ListItemParts, PathError> {
        if !self.is_list_item() {
            return Err(PathError::UnexpectedShape {
                path: self.path,
                expected: "/<node>/<id>/items/<itemId>",
            });
        }
        let mut components = self.components.into_iter();
        let node_name = components.next().unwrap_or_default();
        let id = components.next().unwrap_or_default();
        let item_id = components.nth(1).unwrap_or_default();
        Ok(ListItemParts {
            node_name,
            id,
            item_id,
        })
    }

    fn component(&self, index: usize) -> Option<&str> {
        self.components.get(index).map(String::as_str)
    }
}
