//! Error type for repository operations.

use skystore_model::DecodeError;
use skystore_rx::RxError;

/// Result type alias using the repository error type.
pub type RepoResult<T> = std::result::Result<T, RepoError>;

/// Errors surfaced by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// A record could not be decoded into an entity. For single-entity
    /// fetches this is the operation's failure; list fetches filter the bad
    /// record instead.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Transport or adapter failure, passed through from the stream layer.
    #[error(transparent)]
    Rx(#[from] RxError),
}
