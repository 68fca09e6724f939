//! Ranked fuzzy search over a library snapshot.

use serde::Serialize;

use crate::library::{normalize_title, MediaItem, MediaKind, Snapshot};

use super::similarity::token_set_ratio;

/// Minimum token-set score for an index key to count as a match.
///
/// Lowering this lets unrelated titles through; raising it rejects
/// legitimate one-character typos.
pub const SCORE_THRESHOLD: f32 = 70.0;

/// A matched item with its similarity score (0.0..=100.0).
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub score: f32,
    pub item: MediaItem,
}

/// Search the snapshot's title index for the query.
///
/// Every index key is scored with [`token_set_ratio`] against the
/// normalized query; keys below [`SCORE_THRESHOLD`] are discarded. Up to
/// `2 * limit` candidate keys survive (extra headroom so kind/collection
/// filtering does not starve the result), ordered by score descending with
/// ties kept in the index's lexicographic key order. Candidate ids are then
/// resolved to items, deduplicated, filtered and truncated to `limit`.
///
/// Deterministic: a fixed snapshot and fixed arguments produce the same
/// ordered result on every call.
pub fn search(
    snapshot: &Snapshot,
    query: &str,
    limit: usize,
    kind: Option<MediaKind>,
    collection: Option<&str>,
) -> Vec<SearchMatch> {
    if snapshot.is_empty() || limit == 0 {
        return Vec::new();
    }

    let normalized_query = normalize_title(query);

    let mut candidates: Vec<(&str, f32)> = snapshot
        .index()
        .keys()
        .map(|key| (key, token_set_ratio(&normalized_query, key)))
        .filter(|(_, score)| *score >= SCORE_THRESHOLD)
        .collect();

    // Stable sort: equal scores keep lexicographic key order.
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(limit * 2);

    let mut seen_ids: Vec<&str> = Vec::new();
    let mut results: Vec<SearchMatch> = Vec::new();

    'keys: for (key, score) in candidates {
        let Some(ids) = snapshot.index().ids_for(key) else {
            continue;
        };
        for id in ids {
            if seen_ids.iter().any(|seen| *seen == id.as_str()) {
                continue;
            }
            seen_ids.push(id.as_str());

            let Some(item) = snapshot.get(id) else {
                continue;
            };
            if let Some(kind) = kind {
                if item.kind != kind {
                    continue;
                }
            }
            if let Some(collection) = collection {
                if !item.collection.eq_ignore_ascii_case(collection) {
                    continue;
                }
            }

            results.push(SearchMatch {
                score,
                item: item.clone(),
            });
            if results.len() >= limit {
                break 'keys;
            }
        }
    }

    results
}
