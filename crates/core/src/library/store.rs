//! The in-memory library cache.
//!
//! `LibraryCache` owns the current [`Snapshot`] behind an atomic pointer
//! swap. Reads never lock: they load whatever generation is currently
//! installed and keep it alive for the duration of the call. All mutation
//! goes through [`LibraryCache::install`], driven by the refresh
//! coordinator.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use crate::metrics;
use crate::search::{self, SearchMatch};

use super::snapshot::Snapshot;
use super::types::{LibraryStats, MediaItem, MediaKind};

pub struct LibraryCache {
    current: ArcSwap<Snapshot>,
    refresh_interval: Duration,
}

impl LibraryCache {
    /// Create an empty cache. `refresh_interval` is the staleness horizon:
    /// a snapshot older than this reports stale.
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::empty()),
            refresh_interval,
        }
    }

    /// The currently installed snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Atomically replace the current snapshot. Readers still holding the
    /// previous generation keep it alive until they drop it.
    pub fn install(&self, snapshot: Snapshot) {
        metrics::SNAPSHOT_ITEMS.set(snapshot.len() as i64);
        self.current.store(Arc::new(snapshot));
    }

    /// The configured staleness horizon.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Look up a single item by id.
    pub fn get_by_id(&self, id: &str) -> Option<MediaItem> {
        self.current.load().get(id).cloned()
    }

    /// All items, optionally filtered by kind and/or collection. Unordered.
    pub fn list_all(&self, kind: Option<MediaKind>, collection: Option<&str>) -> Vec<MediaItem> {
        self.current
            .load()
            .items()
            .filter(|item| kind.is_none_or(|k| item.kind == k))
            .filter(|item| {
                collection.is_none_or(|c| item.collection.eq_ignore_ascii_case(c))
            })
            .cloned()
            .collect()
    }

    /// Most recently added items, newest first. Items with no `added_at`
    /// sort as oldest and never appear before dated ones.
    pub fn recently_added(&self, limit: usize, collection: Option<&str>) -> Vec<MediaItem> {
        let mut items: Vec<MediaItem> = self
            .current
            .load()
            .items()
            .filter(|item| {
                collection.is_none_or(|c| item.collection.eq_ignore_ascii_case(c))
            })
            .cloned()
            .collect();

        // None < Some(_), so descending order puts undated items last.
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        items.truncate(limit);
        items
    }

    /// Sorted, de-duplicated collection names present in the snapshot.
    pub fn collections(&self) -> Vec<String> {
        let snapshot = self.current.load();
        let mut names: Vec<String> = snapshot
            .items()
            .map(|item| item.collection.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Fuzzy search the current snapshot.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
        kind: Option<MediaKind>,
        collection: Option<&str>,
    ) -> Vec<SearchMatch> {
        let snapshot = self.current.load();
        let results = search::search(&snapshot, query, limit, kind, collection);
        metrics::SEARCH_QUERIES.inc();
        metrics::SEARCH_RESULTS.observe(results.len() as f64);
        results
    }

    /// Aggregate statistics over the current snapshot.
    pub fn stats(&self) -> LibraryStats {
        let snapshot = self.current.load();
        let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_collection: BTreeMap<String, usize> = BTreeMap::new();

        for item in snapshot.items() {
            *by_kind.entry(item.kind.as_str().to_string()).or_default() += 1;
            *by_collection.entry(item.collection.clone()).or_default() += 1;
        }

        LibraryStats {
            total_items: snapshot.len(),
            by_kind,
            by_collection,
            last_refresh: snapshot.last_refresh(),
            is_stale: self.snapshot_is_stale(&snapshot, Utc::now()),
        }
    }

    /// Whether the snapshot is missing or older than the refresh interval.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    /// Staleness check against an explicit clock value.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        self.snapshot_is_stale(&self.current.load(), now)
    }

    fn snapshot_is_stale(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> bool {
        match snapshot.last_refresh() {
            None => true,
            Some(last_refresh) => {
                let age = now.signed_duration_since(last_refresh);
                age > chrono::Duration::from_std(self.refresh_interval)
                    .unwrap_or(chrono::Duration::MAX)
            }
        }
    }
}
