use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use metro_server::cache::RouteCacheConfig;
use metro_server::config::ServerConfig;
use metro_server::engine::RouteEngine;
use metro_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "metro_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    let source = config.source().expect("Failed to create edge source");

    // Build the graph (fail fast if the source is unavailable)
    info!(strategy = ?config.search.strategy, penalty = config.search.transfer_penalty_mins, "Loading station graph");
    let engine = RouteEngine::load(&source, config.search.clone(), &RouteCacheConfig::default())
        .await
        .expect("Failed to load station graph");
    let engine = Arc::new(engine);

    // Spawn background task to reload the graph periodically
    if let Some(period) = config.reload_interval {
        let engine = engine.clone();
        let source = source.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match engine.reload(&source).await {
                    Ok(loaded) => info!(
                        generation = loaded.generation,
                        stations = loaded.graph.station_count(),
                        "Periodic reload complete"
                    ),
                    Err(e) => warn!(error = %e, "Periodic reload failed"),
                }
            }
        });
    }

    let state = AppState::new(engine, source);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!(addr = %config.bind_addr, "Metro route planner listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
}
