//! Live subscription adapter.
//!
//! A listener registration becomes a [`SnapshotStream`]: each store callback
//! is forwarded through an unbounded channel in arrival order, one emission
//! fully delivered before the next is admitted. The stream owns the
//! registration token; teardown happens exactly once, either when the first
//! error terminates the stream or when the consumer drops it.

use crate::adapter::resolve_slots;
use crate::error::RxResult;
use futures::Stream;
use skystore_client::{
    DocumentRef, DocumentSnapshot, DocumentStore, ListenerRegistration, QueryRef, QuerySnapshot,
};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::debug;

/// Subscribes to live updates of one document.
///
/// The store delivers the current state first, then every subsequent change.
pub fn subscribe<S>(store: &S, doc: &DocumentRef) -> SnapshotStream<DocumentSnapshot>
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = mpsc::unbounded_channel();
    debug!(path = %doc.path(), "registering document listener");
    let registration = store.listen_document(
        doc,
        Arc::new(move |snapshot, error| {
            // Send fails once the consumer is gone; emissions after
            // cancellation are dropped here and never observed.
            let _ = tx.send(resolve_slots(snapshot, error));
        }),
    );
    SnapshotStream::new(rx, registration)
}

/// Subscribes to live updates of a record set.
pub fn subscribe_query<S>(store: &S, query: &QueryRef) -> SnapshotStream<QuerySnapshot>
where
    S: DocumentStore + ?Sized,
{
    let (tx, rx) = mpsc::unbounded_channel();
    debug!(collection = %query.collection, "registering query listener");
    let registration = store.listen_query(
        query,
        Arc::new(move |snapshot, error| {
            let _ = tx.send(resolve_slots(snapshot, error));
        }),
    );
    SnapshotStream::new(rx, registration)
}

/// A live, consumer-cancellable stream of snapshots.
///
/// Yields `Ok` for every update; the first `Err` is also the last item.
/// Dropping the stream deregisters the underlying listener. Deregistration
/// runs exactly once across all paths.
pub struct SnapshotStream<T> {
    rx: mpsc::UnboundedReceiver<RxResult<T>>,
    guard: ListenerGuard,
    done: bool,
}

impl<T> SnapshotStream<T> {
    fn new(rx: mpsc::UnboundedReceiver<RxResult<T>>, registration: ListenerRegistration) -> Self {
        Self {
            rx,
            guard: ListenerGuard {
                registration: Some(registration),
            },
            done: false,
        }
    }
}

impl<T> Stream for SnapshotStream<T> {
    type Item = RxResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(item)) => {
                if item.is_err() {
                    // Listener error terminates the stream: release the
                    // registration now, yield the error as the final item.
                    self.done = true;
                    self.guard.release();
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                self.done = true;
                self.guard.release();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Owns the registration token; removal happens at most once.
struct ListenerGuard {
    registration: Option<ListenerRegistration>,
}

impl ListenerGuard {
    fn release(&mut self) {
        if let Some(registration) = self.registration.take() {
            debug!("removing store listener");
            registration.remove();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}
