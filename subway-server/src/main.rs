use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use subway_server::config::ServerConfig;
use subway_server::route::FareCalculator;
use subway_server::store::MemoryStore;
use subway_server::subway::SubwayService;
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("subway_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // Start empty when the snapshot has not been written yet
    let store = match &config.snapshot {
        Some(path) if path.exists() => {
            MemoryStore::load_snapshot(path).expect("Failed to load network snapshot")
        }
        _ => MemoryStore::new(),
    };

    let state = AppState::new(SubwayService::new(store, FareCalculator::default()));
    let app = create_router(state.clone());

    let listener = TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.addr, "subway server listening");
    info!("  GET  /health                    - Health check");
    info!("  POST /stations                  - Create a station");
    info!("  POST /lines                     - Create a line");
    info!("  POST /lines/:id/sections        - Add a segment");
    info!("  DELETE /lines/:id/sections      - Remove a station from a line");
    info!("  GET  /paths?source=&target=     - Shortest route and fare");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    if let Some(path) = &config.snapshot
        && let Err(e) = state.subway.store().save_snapshot(path)
    {
        error!(error = %e, "failed to save network snapshot");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
