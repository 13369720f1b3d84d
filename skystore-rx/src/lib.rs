//! Stream adaptation layer for skystore.
//!
//! Wraps the callback-shaped [`DocumentStore`](skystore_client::DocumentStore)
//! surface as composable asynchronous primitives, in three flavors:
//!
//! - **One-shot** ([`fetch_once`], [`fetch_query`], [`write_once`],
//!   [`add_once`]): exactly one underlying request, resolving exactly once
//!   with a value or an error.
//! - **One-shot as a stream** ([`query_once`]): a single fetch exposed as a
//!   stream that emits one item and then ends — unlike a live subscription,
//!   which never ends on its own.
//! - **Live subscription** ([`subscribe`], [`subscribe_query`]): a listener
//!   registration exposed as a stream of snapshots. The first error
//!   terminates the stream; dropping the stream deregisters the listener
//!   exactly once.
//!
//! On top of the adapters, [`Outcome`] with [`materialize`] and [`split`]
//! converts stream errors into ordinary values and demultiplexes them onto a
//! success branch and a failure branch, so one failure never tears down a
//! whole subscription chain.
//!
//! A store callback that sets neither of its two slots is a contract
//! violation; the adapters panic rather than leaving the caller suspended
//! forever.

mod adapter;
mod error;
mod listen;
mod outcome;

pub use adapter::{add_once, fetch_once, fetch_query, query_once, write_once, QueryOnce};
pub use error::{RxError, RxResult};
pub use listen::{subscribe, subscribe_query, SnapshotStream};
pub use outcome::{materialize, split, Branch, Outcome};
