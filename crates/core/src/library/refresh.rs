//! Refresh coordination for the library cache.
//!
//! The coordinator owns the only write path into the cache. It fetches the
//! full item set from the media source, builds a new snapshot off to the
//! side and installs it with one atomic swap. Overlapping refresh requests
//! collapse into a single in-flight fetch: late callers attach to the same
//! shared future and observe its outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use crate::metrics;
use crate::source::{MediaSource, SourceError};

use super::snapshot::Snapshot;
use super::store::LibraryCache;

/// Errors surfaced to explicit `refresh_now` callers.
///
/// Cloneable because every waiter on a shared in-flight refresh receives
/// the same outcome.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// The source could not be reached or fully enumerated; the previous
    /// snapshot stays installed.
    #[error("media source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

type SharedRefresh = Shared<BoxFuture<'static, Result<usize, RefreshError>>>;

/// Drives cache refreshes, on demand and on a timer.
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
    periodic_running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

struct Inner {
    cache: Arc<LibraryCache>,
    source: Arc<dyn MediaSource>,
    interval: Duration,
    in_flight: Mutex<Option<SharedRefresh>>,
}

impl RefreshCoordinator {
    /// Create a coordinator. `interval` is both the periodic cadence and
    /// the cache's staleness horizon; the two must agree, so construct the
    /// cache with the same value.
    pub fn new(cache: Arc<LibraryCache>, source: Arc<dyn MediaSource>, interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(Inner {
                cache,
                source,
                interval,
                in_flight: Mutex::new(None),
            }),
            periodic_running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    /// Refresh the cache from the source, returning the installed item
    /// count.
    ///
    /// Single-flight: if a refresh is already running this call awaits the
    /// same in-flight future instead of starting a second fetch, and
    /// returns that refresh's outcome. On failure the previous snapshot is
    /// left untouched.
    pub async fn refresh_now(&self) -> Result<usize, RefreshError> {
        Self::run_shared(&self.inner).await
    }

    /// Start the background refresh loop: refresh, sleep the configured
    /// interval, repeat. Idempotent; a second call while the loop is
    /// running does nothing. Failures inside the loop are logged and never
    /// propagate.
    pub fn start_periodic(&self) {
        if self.periodic_running.swap(true, Ordering::SeqCst) {
            warn!("Periodic refresh already running");
            return;
        }

        let inner = Arc::clone(&self.inner);
        let running = Arc::clone(&self.periodic_running);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let interval = self.inner.interval;

        tokio::spawn(async move {
            info!("Periodic refresh loop started (interval {:?})", interval);
            loop {
                // The refresh itself is not raced against shutdown: a stop
                // request never cancels a fetch already mid-flight.
                if let Err(e) = Self::run_shared(&inner).await {
                    warn!("Periodic refresh failed: {}", e);
                }

                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        if !running.load(Ordering::SeqCst) {
                            break;
                        }
                    }
                }
            }
            info!("Periodic refresh loop stopped");
        });
    }

    /// Stop the background loop. Safe to call when not running. A refresh
    /// already in flight runs to completion.
    pub fn stop_periodic(&self) {
        if !self.periodic_running.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown_tx.send(());
    }

    /// Whether the periodic loop is currently running.
    pub fn is_periodic_running(&self) -> bool {
        self.periodic_running.load(Ordering::SeqCst)
    }

    /// Join the in-flight refresh or start a new one.
    async fn run_shared(inner: &Arc<Inner>) -> Result<usize, RefreshError> {
        let refresh = {
            let mut in_flight = inner.in_flight.lock().await;
            match in_flight.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let task = Arc::clone(inner);
                    let shared = async move { Self::do_refresh(task).await }.boxed().shared();
                    *in_flight = Some(shared.clone());
                    shared
                }
            }
        };

        let result = refresh.clone().await;

        // Whichever waiter finishes first retires the slot. The pointer
        // check keeps a slow waiter from clearing a newer refresh.
        {
            let mut in_flight = inner.in_flight.lock().await;
            if in_flight.as_ref().is_some_and(|f| f.ptr_eq(&refresh)) {
                *in_flight = None;
            }
        }

        result
    }

    /// Fetch, build and install one snapshot generation.
    async fn do_refresh(inner: Arc<Inner>) -> Result<usize, RefreshError> {
        info!("Refreshing library cache from {}", inner.source.name());
        let started = Instant::now();

        let items = match inner.source.fetch_all().await {
            Ok(items) => items,
            Err(e) => {
                metrics::REFRESH_RUNS.with_label_values(&["failed"]).inc();
                metrics::REFRESH_DURATION
                    .with_label_values(&["failed"])
                    .observe(started.elapsed().as_secs_f64());
                return Err(RefreshError::SourceUnavailable(e));
            }
        };

        let count = items.len();
        let snapshot = Snapshot::build(items, Utc::now());
        inner.cache.install(snapshot);

        let elapsed = started.elapsed();
        metrics::REFRESH_RUNS.with_label_values(&["success"]).inc();
        metrics::REFRESH_DURATION
            .with_label_values(&["success"])
            .observe(elapsed.as_secs_f64());
        info!("Library cache refreshed: {} items in {:?}", count, elapsed);

        Ok(count)
    }
}
