//! Title index: normalized title text to candidate item ids.
//!
//! The index is a pure function of an item set. It is rebuilt from scratch
//! on every refresh and never mutated independently of its snapshot.

use std::collections::BTreeMap;

use super::types::MediaItem;

/// Normalize a title for indexing and querying: lowercase, trimmed.
///
/// Idempotent: normalizing an already-normalized title is a no-op.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Mapping from normalized title key to the ids of items sharing that key.
///
/// Each item contributes its normalized title and, when the year is known,
/// a second "{title} {year}" key. Keys iterate in lexicographic order
/// (BTreeMap), which keeps search tie-breaking deterministic. Id order
/// within a key is insertion order and carries no semantic weight.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    keys: BTreeMap<String, Vec<String>>,
}

impl TitleIndex {
    /// Build an index from an item set.
    pub fn build<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a MediaItem>,
    {
        let mut keys: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for item in items {
            let normalized = normalize_title(&item.title);
            if normalized.is_empty() {
                continue;
            }
            if let Some(year) = item.year {
                let with_year = format!("{} {}", normalized, year);
                keys.entry(with_year).or_default().push(item.id.clone());
            }
            keys.entry(normalized).or_default().push(item.id.clone());
        }
        Self { keys }
    }

    /// Ids indexed under the given normalized key.
    pub fn ids_for(&self, key: &str) -> Option<&[String]> {
        self.keys.get(key).map(Vec::as_slice)
    }

    /// All keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
