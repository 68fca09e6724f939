//! Library cache API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use mirrorball_core::{LibraryStats, MediaItem, MediaKind, RefreshError, SearchMatch};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub kind: Option<MediaKind>,
    #[serde(default)]
    pub collection: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub kind: Option<MediaKind>,
    #[serde(default)]
    pub collection: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub collection: Option<String>,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchMatch>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<MediaItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub items: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/library/search
///
/// Fuzzy search the cached library.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let results = state.cache().search(
        &params.query,
        params.limit,
        params.kind,
        params.collection.as_deref(),
    );
    let total = results.len();
    Json(SearchResponse { results, total })
}

/// GET /api/v1/library
///
/// List cached items, optionally filtered by kind and collection.
pub async fn list_all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<ItemListResponse> {
    let items = state
        .cache()
        .list_all(params.kind, params.collection.as_deref());
    let total = items.len();
    Json(ItemListResponse { items, total })
}

/// GET /api/v1/library/recent
///
/// Most recently added items, newest first.
pub async fn recently_added(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> Json<ItemListResponse> {
    let items = state
        .cache()
        .recently_added(params.limit, params.collection.as_deref());
    let total = items.len();
    Json(ItemListResponse { items, total })
}

/// GET /api/v1/library/collections
///
/// Sorted, de-duplicated collection names.
pub async fn list_collections(State(state): State<Arc<AppState>>) -> Json<CollectionsResponse> {
    Json(CollectionsResponse {
        collections: state.cache().collections(),
    })
}

/// GET /api/v1/library/stats
///
/// Cache statistics and staleness.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<LibraryStats> {
    Json(state.cache().stats())
}

/// GET /api/v1/library/{id}
///
/// Get a specific cached item by id.
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MediaItem>, impl IntoResponse> {
    match state.cache().get_by_id(&id) {
        Some(item) => Ok(Json(item)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Item not found: {}", id),
            }),
        )),
    }
}

/// POST /api/v1/library/refresh
///
/// Trigger a refresh from the media source. Joins an in-flight refresh if
/// one is already running.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, impl IntoResponse> {
    match state.refresher().refresh_now().await {
        Ok(items) => Ok(Json(RefreshResponse { items })),
        Err(e @ RefreshError::SourceUnavailable(_)) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
