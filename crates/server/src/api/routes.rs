use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, library};
use crate::metrics;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(metrics::render))
        // Library cache
        .route("/library", get(library::list_all))
        .route("/library/search", get(library::search))
        .route("/library/recent", get(library::recently_added))
        .route("/library/collections", get(library::list_collections))
        .route("/library/stats", get(library::get_stats))
        .route("/library/refresh", post(library::refresh))
        .route("/library/{id}", get(library::get_item))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(TraceLayer::new_for_http())
}
