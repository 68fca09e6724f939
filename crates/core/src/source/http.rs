//! HTTP client for a media server's library API.
//!
//! Enumeration is two-step: list the library sections, then page through
//! every browsable section's items. Any transport, status or decode failure
//! fails the whole fetch; a single record that does not convert to a
//! [`MediaItem`] is logged and skipped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::library::{MediaItem, MediaKind};

use super::{MediaSource, SourceError};

/// Section types the cache mirrors. Episode/season/album/track records come
/// back nested inside these.
const BROWSABLE_SECTION_TYPES: &[&str] = &["movie", "show", "artist"];

const TOKEN_HEADER: &str = "X-Media-Token";

/// Media server library client.
pub struct HttpMediaSource {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpMediaSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        if config.token.is_empty() {
            return Err(SourceError::NotConfigured(
                "media source token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Media source GET {}", path);

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(SourceError::NotConfigured(
                "media source rejected the token".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MediaSource for HttpMediaSource {
    fn name(&self) -> &str {
        "media-server"
    }

    async fn fetch_all(&self) -> Result<Vec<MediaItem>, SourceError> {
        let sections: SectionsResponse = self.get_json("/library/sections").await?;

        let mut items = Vec::new();
        for section in &sections.sections {
            if !BROWSABLE_SECTION_TYPES.contains(&section.kind.as_str()) {
                debug!(
                    "Skipping non-browsable section '{}' ({})",
                    section.title, section.kind
                );
                continue;
            }

            info!("Scanning library section: {} ({})", section.title, section.kind);
            let listing: ItemsResponse = self
                .get_json(&format!("/library/sections/{}/all", section.id))
                .await?;

            for raw in listing.items {
                if let Some(item) = convert_record(raw, &section.title) {
                    items.push(item);
                }
            }
        }

        info!("Fetched {} items from media source", items.len());
        Ok(items)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SectionsResponse {
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    id: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    year: Option<u32>,
    #[serde(default)]
    thumb: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(rename = "durationMs", default)]
    duration_ms: Option<u64>,
    /// Epoch seconds.
    #[serde(rename = "addedAt", default)]
    added_at: Option<i64>,
    #[serde(rename = "leafCount", default)]
    leaf_count: Option<u32>,
    #[serde(rename = "childCount", default)]
    child_count: Option<u32>,
}

/// Convert one raw record into a [`MediaItem`].
///
/// Returns `None` (after logging) for records with an unknown kind or a
/// missing id/title; these are skipped without failing the refresh.
fn convert_record(raw: RawItem, collection: &str) -> Option<MediaItem> {
    let kind = match parse_kind(&raw.kind) {
        Some(kind) => kind,
        None => {
            warn!(
                "Skipping record '{}' with unknown media type '{}'",
                raw.title, raw.kind
            );
            return None;
        }
    };

    if raw.id.is_empty() || raw.title.is_empty() {
        warn!("Skipping record with missing id or title in '{}'", collection);
        return None;
    }

    let added_at = raw
        .added_at
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

    let (episode_count, season_count) = if kind == MediaKind::Show {
        (raw.leaf_count, raw.child_count)
    } else {
        (None, None)
    };

    Some(MediaItem {
        id: raw.id,
        title: raw.title,
        year: raw.year,
        kind,
        collection: collection.to_string(),
        thumbnail: raw.thumb,
        summary: raw.summary,
        rating: raw.rating,
        duration_ms: raw.duration_ms,
        added_at,
        episode_count,
        season_count,
    })
}

fn parse_kind(value: &str) -> Option<MediaKind> {
    match value {
        "movie" => Some(MediaKind::Movie),
        "show" => Some(MediaKind::Show),
        "episode" => Some(MediaKind::Episode),
        "season" => Some(MediaKind::Season),
        "artist" => Some(MediaKind::Artist),
        "album" => Some(MediaKind::Album),
        "track" => Some(MediaKind::Track),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, title: &str, kind: &str) -> RawItem {
        RawItem {
            id: id.to_string(),
            title: title.to_string(),
            kind: kind.to_string(),
            year: Some(2008),
            thumb: Some("/thumb/1".to_string()),
            summary: None,
            rating: Some(9.5),
            duration_ms: Some(2_700_000),
            added_at: Some(1_700_000_000),
            leaf_count: Some(62),
            child_count: Some(5),
        }
    }

    #[test]
    fn test_convert_show_record() {
        let item = convert_record(raw("1", "Breaking Bad", "show"), "TV Shows").unwrap();

        assert_eq!(item.id, "1");
        assert_eq!(item.kind, MediaKind::Show);
        assert_eq!(item.collection, "TV Shows");
        assert_eq!(item.year, Some(2008));
        assert_eq!(item.episode_count, Some(62));
        assert_eq!(item.season_count, Some(5));
        assert!(item.added_at.is_some());
    }

    #[test]
    fn test_convert_movie_drops_show_counts() {
        let item = convert_record(raw("3", "The Matrix", "movie"), "Movies").unwrap();
        assert_eq!(item.episode_count, None);
        assert_eq!(item.season_count, None);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        assert!(convert_record(raw("1", "Mystery", "hologram"), "Movies").is_none());
    }

    #[test]
    fn test_missing_id_or_title_is_skipped() {
        assert!(convert_record(raw("", "No Id", "movie"), "Movies").is_none());
        assert!(convert_record(raw("7", "", "movie"), "Movies").is_none());
    }

    #[test]
    fn test_new_requires_token() {
        let config = SourceConfig {
            base_url: "http://localhost:32400".to_string(),
            token: String::new(),
            timeout_secs: 30,
        };
        assert!(matches!(
            HttpMediaSource::new(&config),
            Err(SourceError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = SourceConfig {
            base_url: "http://localhost:32400/".to_string(),
            token: "secret".to_string(),
            timeout_secs: 30,
        };
        let source = HttpMediaSource::new(&config).unwrap();
        assert_eq!(source.base_url, "http://localhost:32400");
    }

    #[test]
    fn test_items_response_tolerates_sparse_records() {
        let json = r#"{"items": [{"id": "1", "title": "Pi", "type": "movie"}]}"#;
        let listing: ItemsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.items.len(), 1);
        assert!(listing.items[0].year.is_none());
    }
}
