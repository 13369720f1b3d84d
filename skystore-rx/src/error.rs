//! Error type for the stream adaptation layer.

use skystore_client::StoreError;

/// Result type alias using the adapter error type.
pub type RxResult<T> = std::result::Result<T, RxError>;

/// Errors surfaced by the stream adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RxError {
    /// Transport error reported by the store's callback, passed through
    /// unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The store dropped a completion callback without ever invoking it.
    /// Detectable in Rust (the delivery channel closes), so it is surfaced
    /// instead of hanging the caller.
    #[error("store dropped the completion callback without invoking it")]
    Canceled,
}
