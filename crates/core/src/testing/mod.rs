//! Testing utilities and mock implementations.
//!
//! This module provides a controllable [`MockMediaSource`] and shared
//! fixtures, allowing the refresh and query paths to be tested without a
//! real media server.
//!
//! # Example
//!
//! ```rust,ignore
//! use mirrorball_core::testing::{fixtures, MockMediaSource};
//!
//! let source = MockMediaSource::new();
//! source.set_items(fixtures::small_library()).await;
//!
//! // Drive a refresh, then assert on the fetch counter...
//! assert_eq!(source.fetch_count(), 1);
//! ```

mod mock_source;

pub use mock_source::MockMediaSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::library::{MediaItem, MediaKind};

    /// Create a test media item with reasonable defaults.
    pub fn media_item(id: &str, title: &str, year: Option<u32>) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: title.to_string(),
            year,
            kind: MediaKind::Movie,
            collection: "Movies".to_string(),
            thumbnail: None,
            summary: None,
            rating: None,
            duration_ms: None,
            added_at: None,
            episode_count: None,
            season_count: None,
        }
    }

    /// Create a test show.
    pub fn show(id: &str, title: &str, year: u32, collection: &str) -> MediaItem {
        let mut item = media_item(id, title, Some(year));
        item.kind = MediaKind::Show;
        item.collection = collection.to_string();
        item
    }

    /// Create a test movie.
    pub fn movie(id: &str, title: &str, year: u32, collection: &str) -> MediaItem {
        let mut item = media_item(id, title, Some(year));
        item.kind = MediaKind::Movie;
        item.collection = collection.to_string();
        item
    }

    /// A small mixed library: two shows in "TV Shows", two movies in
    /// "Movies".
    pub fn small_library() -> Vec<MediaItem> {
        vec![
            show("1", "Breaking Bad", 2008, "TV Shows"),
            show("2", "Better Call Saul", 2015, "TV Shows"),
            movie("3", "The Matrix", 1999, "Movies"),
            movie("4", "Interstellar", 2014, "Movies"),
        ]
    }
}
