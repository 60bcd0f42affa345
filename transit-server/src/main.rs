use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use transit_server::cache::{CacheConfig, PlanCache};
use transit_server::network::MemoryNetwork;
use transit_server::planner::PlannerConfig;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("transit_server=info,tower_http=info")
        }))
        .init();

    // Load the network seed
    let seed_path =
        std::env::var("TRANSIT_SEED").unwrap_or_else(|_| "data/network.json".to_string());
    let network = match MemoryNetwork::load(&seed_path) {
        Ok(network) => network,
        Err(e) => {
            tracing::error!(seed_path = %seed_path, error = %e, "failed to load network seed");
            std::process::exit(1);
        }
    };
    tracing::info!(
        stations = network.station_count(),
        routes = network.route_count(),
        seed_path = %seed_path,
        "network loaded"
    );

    // Build app state
    let cache = PlanCache::new(&CacheConfig::default());
    let state = AppState::new(network, PlannerConfig::default(), cache);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = std::env::var("TRANSIT_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("TRANSIT_ADDR must be a host:port socket address");

    tracing::info!(%addr, "transit journey planner listening");
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health                   - Health check");
    tracing::info!("  POST /journey/plan             - Plan a journey");
    tracing::info!("  GET  /journey/nearby-stations  - Stations near a coordinate");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
