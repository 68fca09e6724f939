//! The library cache: an in-memory mirror of the media server's catalog.
//!
//! Readers query whatever snapshot generation is currently installed; the
//! refresh coordinator is the only writer and replaces whole generations
//! atomically, so no query ever observes a partially rebuilt cache.

mod index;
mod refresh;
mod snapshot;
mod store;
mod types;

pub use index::{normalize_title, TitleIndex};
pub use refresh::{RefreshCoordinator, RefreshError};
pub use snapshot::Snapshot;
pub use store::LibraryCache;
pub use types::{LibraryStats, MediaItem, MediaKind};
