//! Category repository and view-model.
//!
//! Composes the stream adapters with the entity decoder into domain-level
//! operations, then projects their results into UI-observable state:
//!
//! - [`CategoryRepository`] — fetch-by-id, list-all, live list, write paths;
//!   independent of the store's native types. [`StoreCategoryRepository`] is
//!   the store-backed implementation; the store handle is injected at
//!   construction so tests can substitute a fake.
//! - [`CategoryViewModel`] — subscribes to repository outputs, runs them
//!   through the success/failure envelope, and republishes formatted state
//!   into broadcast channels a presentation layer observes. The view-model
//!   owns the cancellation scope for everything it spawns.
//!
//! Failures never cross the presentation boundary as errors — only as fixed,
//! non-technical messages on the error channel.

mod error;
mod repository;
mod view_model;

pub use error::{RepoError, RepoResult};
pub use repository::{CategoryRepository, StoreCategoryRepository};
pub use view_model::{CategoryViewModel, ViewModelConfig};
