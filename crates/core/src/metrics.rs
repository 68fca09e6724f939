//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Cache refreshes (counts, durations, snapshot size)
//! - Search queries (counts, result set sizes)

use once_cell::sync::Lazy;
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
};

/// Refresh runs total by result.
pub static REFRESH_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mirrorball_refresh_runs_total", "Total cache refresh runs"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Refresh duration in seconds.
pub static REFRESH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mirrorball_refresh_duration_seconds",
            "Duration of cache refreshes",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["result"],
    )
    .unwrap()
});

/// Items in the currently installed snapshot.
pub static SNAPSHOT_ITEMS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "mirrorball_snapshot_items",
        "Number of items in the current snapshot",
    )
    .unwrap()
});

/// Search queries total.
pub static SEARCH_QUERIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mirrorball_search_queries_total",
        "Total fuzzy search queries served",
    )
    .unwrap()
});

/// Results returned per search query.
pub static SEARCH_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "mirrorball_search_results",
            "Number of results returned per search query",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(REFRESH_RUNS.clone()),
        Box::new(REFRESH_DURATION.clone()),
        Box::new(SNAPSHOT_ITEMS.clone()),
        Box::new(SEARCH_QUERIES.clone()),
        Box::new(SEARCH_RESULTS.clone()),
    ]
}
