//! Success/failure envelopes and the split operation.
//!
//! [`materialize`] rewrites a fallible stream so errors travel as ordinary
//! values; [`split`] then demultiplexes the envelopes onto two branches.
//! Together they keep a failure from propagating as a stream-level error
//! that would permanently unsubscribe every downstream consumer.

use futures::{future, Stream, StreamExt};
use std::pin::{pin, Pin};
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// A tagged success/failure envelope carried as a stream value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    pub fn failure(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }
}

/// Wraps every item of a fallible stream in an [`Outcome`].
///
/// `Ok` becomes `Success`; the first `Err` becomes a single `Failure`
/// followed by normal completion. The returned stream itself never carries
/// an error past this point.
pub fn materialize<T, E, S>(stream: S) -> impl Stream<Item = Outcome<T, E>>
where
    S: Stream<Item = Result<T, E>>,
{
    stream.scan(false, |failed, item| {
        let next = if *failed {
            None
        } else {
            Some(match item {
                Ok(value) => Outcome::Success(value),
                Err(error) => {
                    *failed = true;
                    Outcome::Failure(error)
                }
            })
        };
        future::ready(next)
    })
}

/// Demultiplexes an envelope stream into a success branch and a failure
/// branch.
///
/// Every envelope resolves to exactly one emission across the two branches;
/// both branches end when the source ends. One forwarding task drives the
/// source; it also exits as soon as both branches have been dropped, which
/// releases the source (and any listener registration it owns) promptly.
///
/// Must be called from within a tokio runtime.
pub fn split<T, E, S>(stream: S) -> (Branch<T>, Branch<E>)
where
    T: Send + 'static,
    E: Send + 'static,
    S: Stream<Item = Outcome<T, E>> + Send + 'static,
{
    let (success_tx, success_rx) = mpsc::unbounded_channel();
    let (failure_tx, failure_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut stream = pin!(stream);
        loop {
            tokio::select! {
                item = stream.next() => match item {
                    Some(Outcome::Success(value)) => {
                        let _ = success_tx.send(value);
                    }
                    Some(Outcome::Failure(error)) => {
                        let _ = failure_tx.send(error);
                    }
                    None => break,
                },
                _ = both_closed(&success_tx, &failure_tx) => break,
            }
        }
    });

    (Branch { rx: success_rx }, Branch { rx: failure_rx })
}

async fn both_closed<A, B>(a: &mpsc::UnboundedSender<A>, b: &mpsc::UnboundedSender<B>) {
    tokio::join!(a.closed(), b.closed());
}

/// One output branch of [`split`].
pub struct Branch<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Stream for Branch<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
