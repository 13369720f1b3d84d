//! The callback-shaped store trait and its callback types.
//!
//! Callbacks follow the two-slot convention of the wrapped SDK: exactly one
//! of {value, error} is non-`None` per invocation. A callback invoked with
//! neither slot set is a defect in the store implementation; the stream
//! adapter layer treats it as an invariant violation rather than hanging the
//! caller.

use crate::handle::{CollectionRef, DocumentRef, QueryRef};
use crate::snapshot::{DocumentSnapshot, QuerySnapshot};
use crate::StoreError;
use serde_json::Value;
use std::sync::Arc;

/// Completion callback for a one-shot document fetch.
pub type DocumentCallback = Box<dyn FnOnce(Option<DocumentSnapshot>, Option<StoreError>) + Send>;

/// Completion callback for a one-shot query fetch.
pub type QueryCallback = Box<dyn FnOnce(Option<QuerySnapshot>, Option<StoreError>) + Send>;

/// Completion callback for a write. `None` means the write succeeded.
pub type WriteCallback = Box<dyn FnOnce(Option<StoreError>) + Send>;

/// Completion callback for an add; the value slot carries the handle the
/// store assigned to the new document.
pub type AddCallback = Box<dyn FnOnce(Option<DocumentRef>, Option<StoreError>) + Send>;

/// Live listener over one document. Called zero or more times until the
/// registration is removed.
pub type DocumentListener = Arc<dyn Fn(Option<DocumentSnapshot>, Option<StoreError>) + Send + Sync>;

/// Live listener over a record set.
pub type QueryListener = Arc<dyn Fn(Option<QuerySnapshot>, Option<StoreError>) + Send + Sync>;

/// Token returned by listener registration.
///
/// [`remove`](Self::remove) consumes the token, so deregistration happens at
/// most once by construction. Dropping the token without calling `remove`
/// leaves the listener registered (callers that need drop-driven teardown
/// wrap the token; see the stream adapter crate).
pub struct ListenerRegistration {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerRegistration {
    /// Wraps the store-specific teardown closure.
    #[must_use]
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Deregisters the underlying listener.
    pub fn remove(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

/// The external document store.
///
/// Mirrors the wrapped SDK's surface: one-shot operations take a completion
/// callback invoked at most once; listener registrations are invoked zero or
/// more times until removed. Implementations must not block the caller —
/// callbacks are delivered from the store's own execution context.
pub trait DocumentStore: Send + Sync + 'static {
    /// Fetches one document.
    fn get_document(&self, doc: &DocumentRef, completion: DocumentCallback);

    /// Writes `fields` to the document. With `merge`, unspecified fields are
    /// left untouched; otherwise the document is replaced.
    fn set_document(&self, doc: &DocumentRef, fields: Value, merge: bool, completion: WriteCallback);

    /// Adds a document with a store-assigned id.
    fn add_document(&self, collection: &CollectionRef, fields: Value, completion: AddCallback);

    /// Fetches all documents matching `query`.
    fn get_documents(&self, query: &QueryRef, completion: QueryCallback);

    /// Registers a live listener on one document. The store delivers the
    /// current state first, then every subsequent change.
    fn listen_document(&self, doc: &DocumentRef, listener: DocumentListener)
    -> ListenerRegistration;

    /// Registers a live listener on a record set.
    fn listen_query(&self, query: &QueryRef, listener: QueryListener) -> ListenerRegistration;
}
