//! Typo-tolerant search over the library cache.
//!
//! The engine ranks title-index keys with a token-set similarity metric and
//! resolves them to filtered, deduplicated items. It is a pure function of
//! a snapshot, so it can be tested without any I/O or concurrency.

mod engine;
mod similarity;

pub use engine::{search, SearchMatch, SCORE_THRESHOLD};
pub use similarity::{levenshtein_distance, token_set_ratio};
