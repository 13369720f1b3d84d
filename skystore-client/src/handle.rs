//! Opaque references into the external document store.
//!
//! Handles name a location; they hold no connection state and are cheap to
//! clone. Operations borrow them for their own duration only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a single document within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Slash-separated path of the owning collection.
    pub collection: String,
    /// Document id within the collection.
    pub id: String,
}

impl DocumentRef {
    #[must_use]
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Full store path of the document (`collection/id`).
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Reference to a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionRef {
    /// Slash-separated collection path.
    pub path: String,
}

impl CollectionRef {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Handle to the document `id` inside this collection.
    #[must_use]
    pub fn doc(&self, id: impl Into<String>) -> DocumentRef {
        DocumentRef::new(self.path.clone(), id)
    }

    /// Unfiltered query over this collection (store-native order).
    #[must_use]
    pub fn query(&self) -> QueryRef {
        QueryRef {
            collection: self.clone(),
            order_by: None,
        }
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Ordering requested from the store for a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryOrder {
    Ascending(String),
    Descending(String),
}

/// Reference to a record set: a collection plus optional server-side order.
///
/// Consumers must not trust the store to honor the order; the repository
/// layer re-sorts decoded entities regardless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryRef {
    pub collection: CollectionRef,
    pub order_by: Option<QueryOrder>,
}

impl QueryRef {
    /// Returns a copy of this query ordered by `field`.
    #[must_use]
    pub fn order_by(mut self, order: QueryOrder) -> Self {
        self.order_by = Some(order);
        self
    }
}
