//! Media source abstraction.
//!
//! The cache never talks to the media server directly; it goes through the
//! `MediaSource` trait so the refresh path can be driven by the real HTTP
//! client in production and by `testing::MockMediaSource` in tests.

mod http;

pub use http::HttpMediaSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::library::MediaItem;

/// Errors from the external media source.
///
/// Payloads are plain strings so the error can be cloned to every waiter of
/// a shared in-flight refresh.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Could not reach the source at all.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The source answered with a non-success status.
    #[error("source API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The source answered but the payload could not be decoded.
    #[error("failed to parse source response: {0}")]
    Parse(String),

    /// Client misconfiguration (missing token, bad URL).
    #[error("source not configured: {0}")]
    NotConfigured(String),
}

/// Trait for enumerating the external media catalog.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Human-readable source name for logging.
    fn name(&self) -> &str;

    /// Fetch every item across all browsable sections.
    ///
    /// All-or-nothing: if any section cannot be fully enumerated the whole
    /// call fails and the caller keeps its previous snapshot. Individual
    /// records that cannot be converted are skipped and logged, not fatal.
    async fn fetch_all(&self) -> Result<Vec<MediaItem>, SourceError>;
}
