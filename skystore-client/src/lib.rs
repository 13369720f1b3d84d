//! External document-store contract for skystore.
//!
//! This crate defines the minimal surface the rest of the workspace requires
//! from a cloud document database client:
//! - Handles: [`DocumentRef`], [`CollectionRef`], [`QueryRef`]
//! - Payloads: [`DocumentSnapshot`], [`QuerySnapshot`]
//! - The callback-shaped [`DocumentStore`] trait and its two-slot callback
//!   types (exactly one of {value, error} is set per invocation)
//! - [`ListenerRegistration`], the at-most-once deregistration token for
//!   live listeners
//!
//! No concrete client lives here. Real SDK bindings implement
//! [`DocumentStore`] outside this workspace; tests substitute in-memory
//! fakes.

mod handle;
mod snapshot;
mod store;

pub use handle::{CollectionRef, DocumentRef, QueryOrder, QueryRef};
pub use snapshot::{DocumentSnapshot, QuerySnapshot};
pub use store::{
    AddCallback, DocumentCallback, DocumentListener, DocumentStore, ListenerRegistration,
    QueryCallback, QueryListener, WriteCallback,
};

/// Result type alias using the store error type.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by the external document store through its callbacks.
///
/// These are transport-level failures. They are propagated unchanged through
/// the stream adapters and only become user-visible state once the envelope
/// layer converts them into values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The caller is not allowed to access the referenced location.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Any other error surfaced by the backing SDK.
    #[error("backend error: {0}")]
    Backend(String),
}
