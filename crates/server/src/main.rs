use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mirrorball_core::{
    load_config, validate_config, HttpMediaSource, LibraryCache, MediaSource, RefreshCoordinator,
};

use mirrorball_server::{create_router, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MIRRORBALL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Media source: {}", config.source.base_url);
    info!(
        "Refresh interval: {} minutes",
        config.cache.refresh_interval_minutes
    );

    // Create the media source client
    let source: Arc<dyn MediaSource> = Arc::new(
        HttpMediaSource::new(&config.source).context("Failed to create media source client")?,
    );

    // Create the cache and its refresh coordinator
    let refresh_interval = config.cache.refresh_interval();
    let cache = Arc::new(LibraryCache::new(refresh_interval));
    let refresher = Arc::new(RefreshCoordinator::new(
        Arc::clone(&cache),
        source,
        refresh_interval,
    ));

    // Warm the cache once before serving. A failure here is not fatal: the
    // server starts with an empty cache and the periodic loop retries.
    match refresher.refresh_now().await {
        Ok(count) => info!("Initial cache warm-up complete: {} items", count),
        Err(e) => warn!("Initial cache warm-up failed, serving empty cache: {}", e),
    }

    // Start the background refresh loop
    refresher.start_periodic();

    // Create app state and router
    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::clone(&cache),
        Arc::clone(&refresher),
    ));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    refresher.stop_periodic();
    info!("Periodic refresh stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
