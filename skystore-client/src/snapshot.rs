//! Point-in-time payloads returned by the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable point-in-time view of one document.
///
/// `fields` holds arbitrary JSON whose structure is defined by the record's
/// schema in the external store. Snapshots are produced by the store in
/// response to a fetch or as a live-update event and consumed exactly once
/// per emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// The document id within its collection.
    pub id: String,
    /// The document body.
    pub fields: Value,
}

impl DocumentSnapshot {
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Looks up a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Extracts a top-level string field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Extracts a top-level integer field.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }
}

/// An immutable point-in-time view of a record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySnapshot {
    /// Matching documents, in the order the store returned them.
    pub documents: Vec<DocumentSnapshot>,
}

impl QuerySnapshot {
    #[must_use]
    pub fn new(documents: Vec<DocumentSnapshot>) -> Self {
        Self { documents }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
