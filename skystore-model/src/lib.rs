//! Domain entity model for skystore.
//!
//! Defines [`Category`], the decoded, strongly-typed view of a store record,
//! and the decoding contract: required fields fail atomically with
//! [`DecodeError`], optional fields fall back to defaults. Decoding is pure —
//! a snapshot either yields a complete entity or no entity at all.

mod category;

pub use category::Category;

/// Result type alias using the decode error type.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors raised while decoding a snapshot into an entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A required field is missing or has the wrong type. No partial entity
    /// is ever produced.
    #[error("malformed record: required field `{field}` missing or mistyped")]
    MalformedRecord { field: &'static str },
}
