//! Mock media source for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::library::MediaItem;
use crate::source::{MediaSource, SourceError};

/// Mock implementation of the [`MediaSource`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable item sets
/// - Count fetches for single-flight assertions
/// - Simulate failures and slow enumerations
pub struct MockMediaSource {
    /// Items returned by successful fetches.
    items: RwLock<Vec<MediaItem>>,
    /// Number of `fetch_all` calls made so far.
    fetch_count: AtomicUsize,
    /// If set, the next fetch fails with this error (consumed on use).
    next_error: RwLock<Option<SourceError>>,
    /// If set, every fetch fails with this error.
    persistent_error: RwLock<Option<SourceError>>,
    /// Simulated enumeration time.
    fetch_delay: RwLock<Option<Duration>>,
}

impl Default for MockMediaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMediaSource {
    /// Create a new mock source with no items.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            fetch_count: AtomicUsize::new(0),
            next_error: RwLock::new(None),
            persistent_error: RwLock::new(None),
            fetch_delay: RwLock::new(None),
        }
    }

    /// Set the items returned by subsequent fetches.
    pub async fn set_items(&self, items: Vec<MediaItem>) {
        *self.items.write().await = items;
    }

    /// Number of `fetch_all` calls made against this mock.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure every fetch to fail until cleared.
    pub async fn set_persistent_error(&self, error: Option<SourceError>) {
        *self.persistent_error.write().await = error;
    }

    /// Make every fetch take at least this long. Useful for overlapping
    /// concurrent refreshes deterministically.
    pub async fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.write().await = Some(delay);
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_all(&self) -> Result<Vec<MediaItem>, SourceError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        let delay = *self.fetch_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.persistent_error.read().await.clone() {
            return Err(err);
        }
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.items.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_fetch_returns_configured_items() {
        let source = MockMediaSource::new();
        source.set_items(fixtures::small_library()).await;

        let items = source.fetch_all().await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_counts_every_call() {
        let source = MockMediaSource::new();
        source.fetch_all().await.unwrap();
        source.fetch_all().await.unwrap();
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let source = MockMediaSource::new();
        source
            .set_next_error(SourceError::Connection("down".to_string()))
            .await;

        assert!(source.fetch_all().await.is_err());
        assert!(source.fetch_all().await.is_ok());
    }

    #[tokio::test]
    async fn test_persistent_error_repeats() {
        let source = MockMediaSource::new();
        source
            .set_persistent_error(Some(SourceError::Connection("down".to_string())))
            .await;

        assert!(source.fetch_all().await.is_err());
        assert!(source.fetch_all().await.is_err());

        source.set_persistent_error(None).await;
        assert!(source.fetch_all().await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_delay_is_applied() {
        let source = MockMediaSource::new();
        source.set_fetch_delay(Duration::from_millis(50)).await;

        let started = std::time::Instant::now();
        source.fetch_all().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
