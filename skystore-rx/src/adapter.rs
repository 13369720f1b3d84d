//! One-shot operation adapters.
//!
//! Each adapter issues exactly one underlying request and resolves exactly
//! once. Delivery goes through a `tokio::sync::oneshot` channel: the store's
//! completion callback sends, the adapter awaits.

use crate::error::{RxError, RxResult};
use futures::Stream;
use serde_json::Value;
use skystore_client::{
    CollectionRef, DocumentRef, DocumentSnapshot, DocumentStore, QueryRef, QuerySnapshot,
    StoreError,
};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::debug;

/// Collapses a two-slot callback result into a `Result`.
///
/// The error slot wins if both are set (matching the wrapped SDK's own
/// precedence). Neither slot set is a store-side contract violation and a
/// logic error here, not a recoverable condition.
pub(crate) fn resolve_slots<T>(value: Option<T>, error: Option<StoreError>) -> RxResult<T> {
    match (value, error) {
        (_, Some(error)) => Err(RxError::Store(error)),
        (Some(value), None) => Ok(value),
        (None, None) => {
            panic!("document store callback delivered neither a value nor an error")
        }
    }
}

/// Fetches one document. Resolves exactly once.
pub async fn fetch_once<S>(store: &S, doc: &DocumentRef) -> RxResult<DocumentSnapshot>
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    debug!(path = %doc.path(), "issuing one-shot document fetch");
    store.get_document(
        doc,
        Box::new(move |snapshot, error| {
            let _ = tx.send(resolve_slots(snapshot, error));
        }),
    );
    rx.await.map_err(|_| RxError::Canceled)?
}

/// Fetches all documents matching `query`. Resolves exactly once.
pub async fn fetch_query<S>(store: &S, query: &QueryRef) -> RxResult<QuerySnapshot>
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    debug!(collection = %query.collection, "issuing one-shot query fetch");
    store.get_documents(
        query,
        Box::new(move |snapshot, error| {
            let _ = tx.send(resolve_slots(snapshot, error));
        }),
    );
    rx.await.map_err(|_| RxError::Canceled)?
}

/// Writes `fields` to the document. The merge flag is delegated to the
/// store; the adapter adds no retry of its own.
pub async fn write_once<S>(
    store: &S,
    doc: &DocumentRef,
    fields: Value,
    merge: bool,
) -> RxResult<()>
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    debug!(path = %doc.path(), merge, "issuing document write");
    store.set_document(
        doc,
        fields,
        merge,
        Box::new(move |error| {
            let _ = tx.send(match error {
                Some(error) => Err(RxError::Store(error)),
                None => Ok(()),
            });
        }),
    );
    rx.await.map_err(|_| RxError::Canceled)?
}

/// Adds a document with a store-assigned id, resolving with its handle.
pub async fn add_once<S>(store: &S, collection: &CollectionRef, fields: Value) -> RxResult<DocumentRef>
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    debug!(collection = %collection, "adding document");
    store.add_document(
        collection,
        fields,
        Box::new(move |doc, error| {
            let _ = tx.send(resolve_slots(doc, error));
        }),
    );
    rx.await.map_err(|_| RxError::Canceled)?
}

/// A one-shot query fetch exposed as a stream.
///
/// Emits exactly one `Result` item, then ends. This is the shape callers
/// compose with [`materialize`](crate::materialize)/[`split`](crate::split);
/// contrast with [`subscribe_query`](crate::subscribe_query), which never
/// ends on its own.
pub fn query_once<S>(store: &S, query: &QueryRef) -> QueryOnce
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    debug!(collection = %query.collection, "issuing one-shot query fetch as stream");
    store.get_documents(
        query,
        Box::new(move |snapshot, error| {
            let _ = tx.send(resolve_slots(snapshot, error));
        }),
    );
    QueryOnce { rx: Some(rx) }
}

/// Stream returned by [`query_once`].
pub struct QueryOnce {
    rx: Option<oneshot::Receiver<RxResult<QuerySnapshot>>>,
}

impl Stream for QueryOnce {
    type Item = RxResult<QuerySnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(rx) = self.rx.as_mut() else {
            return Poll::Ready(None);
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(Ok(item)) => {
                self.rx = None;
                Poll::Ready(Some(item))
            }
            Poll::Ready(Err(_)) => {
                self.rx = None;
                Poll::Ready(Some(Err(RxError::Canceled)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
