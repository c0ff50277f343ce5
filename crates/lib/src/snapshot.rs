//! Read-result wrappers.
//!
//! A [`Snapshot`] holds the raw JSON body of a read or write response. When
//! the body is an array (a collection read) it also exposes one [`Document`]
//! per element through [`Snapshot::docs`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;

/// One element of a collection read.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    data: Value,
}

impl Document {
    /// Wrap a single element. The id is taken from the element's `id` field
    /// when it is a string or a number, and is empty otherwise.
    pub fn new(data: Value) -> Self {
        let id = match data.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        Self { id, data }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw element.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Deserialize the element into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.data)?)
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}

/// The result of reading (or writing) a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    id: String,
    data: Value,
    docs: Vec<Document>,
}

impl Snapshot {
    pub fn new(data: Value) -> Self {
        let docs = match &data {
            Value::Array(items) => items.iter().cloned().map(Document::new).collect(),
            _ => Vec::new(),
        };
        Self {
            id: String::new(),
            data,
            docs,
        }
    }

    /// Always empty; kept for call sites that read `snapshot.id`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw response body.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Deserialize the response body into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.data)?)
    }

    /// Per-element wrappers; empty unless the body is an array.
    pub fn docs(&self) -> &[Document] {
        &self.docs
    }

    /// Whether the response body is `null` (e.g. an empty response).
    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}

impl From<Value> for Snapshot {
    fn from(data: Value) -> Self {
        Snapshot::new(data)
    }
}
