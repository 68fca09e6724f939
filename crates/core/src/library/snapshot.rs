//! One immutable generation of the mirrored library.
//!
//! A snapshot bundles the item set, the title index derived from it and the
//! time the refresh completed. It is built fully off to the side by the
//! refresh coordinator and then published with a single atomic swap, so
//! readers always observe a complete generation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::index::TitleIndex;
use super::types::MediaItem;

/// A complete, internally consistent generation of cached items.
pub struct Snapshot {
    items: HashMap<String, MediaItem>,
    index: TitleIndex,
    last_refresh: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// The pre-first-refresh snapshot: no items, no refresh time.
    pub fn empty() -> Self {
        Self {
            items: HashMap::new(),
            index: TitleIndex::default(),
            last_refresh: None,
        }
    }

    /// Build a snapshot from a freshly fetched item set.
    ///
    /// Ids are unique within a fetch; if the source ever repeats one, the
    /// later record wins and the index is built from the deduplicated set.
    pub fn build(items: Vec<MediaItem>, refreshed_at: DateTime<Utc>) -> Self {
        let mut map: HashMap<String, MediaItem> = HashMap::with_capacity(items.len());
        for item in items {
            map.insert(item.id.clone(), item);
        }
        let index = TitleIndex::build(map.values());
        Self {
            items: map,
            index,
            last_refresh: Some(refreshed_at),
        }
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&MediaItem> {
        self.items.get(id)
    }

    /// Iterate over all items (unordered).
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.values()
    }

    /// The title index derived from this snapshot.
    pub fn index(&self) -> &TitleIndex {
        &self.index
    }

    /// When this snapshot was installed; `None` before the first refresh.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Number of items in this snapshot.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
