//! Types for the media library cache.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of media item mirrored from the source server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Show,
    Episode,
    Season,
    Artist,
    Album,
    Track,
}

impl MediaKind {
    /// Stable string form, used as a stats key and in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "show",
            MediaKind::Episode => "episode",
            MediaKind::Season => "season",
            MediaKind::Artist => "artist",
            MediaKind::Album => "album",
            MediaKind::Track => "track",
        }
    }
}

/// One library entry mirrored from the media source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Opaque stable identifier, unique within a snapshot.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Release year (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    /// Kind of media.
    pub kind: MediaKind,
    /// Name of the library section this item belongs to.
    pub collection: String,
    /// Opaque thumbnail reference on the source server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Plot summary or description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Source rating, 0.0-10.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Runtime in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// When the item was added to the source library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    /// Episode count (shows only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    /// Season count (shows only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_count: Option<u32>,
}

impl MediaItem {
    /// Title with the year appended when known, e.g. "The Matrix (1999)".
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }

    /// Human-readable runtime, e.g. "2h 16m" or "42m".
    pub fn duration_text(&self) -> Option<String> {
        let total_minutes = self.duration_ms? / 60_000;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        if hours > 0 {
            Some(format!("{}h {}m", hours, minutes))
        } else {
            Some(format!("{}m", minutes))
        }
    }
}

/// Aggregate statistics over the current snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    /// Total cached items.
    pub total_items: usize,
    /// Item counts keyed by kind string.
    pub by_kind: BTreeMap<String, usize>,
    /// Item counts keyed by collection name.
    pub by_collection: BTreeMap<String, usize>,
    /// When the snapshot was installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<DateTime<Utc>>,
    /// Whether the snapshot is older than the refresh interval.
    pub is_stale: bool,
}
