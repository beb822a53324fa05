use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mrt_server::cache::{CacheConfig, CachedPlanner};
use mrt_server::loader::load_network;
use mrt_server::network::RouteGraph;
use mrt_server::planner::{Planner, SearchConfig};
use mrt_server::web::{AppState, create_router};

/// Default location of the network description file.
const DEFAULT_DATA_PATH: &str = "mrt.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_path = std::env::var("MRT_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

    let network = match load_network(&data_path) {
        Ok(network) => Arc::new(network),
        Err(e) => {
            eprintln!("Failed to load network from {data_path}: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} stations on {} lines from {data_path}",
        network.stations().len(),
        network.lines().len()
    );

    let graph = Arc::new(RouteGraph::build(&network));
    let planner = Planner::new(Arc::clone(&network), graph, SearchConfig::default());
    let cached = CachedPlanner::new(planner, &CacheConfig::default());

    let state = AppState::new(network, cached);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("MRT Route Planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health               - Health check");
    println!("  GET /stations             - List stations");
    println!("  GET /stations/:id         - Station details");
    println!("  GET /route?from=X&to=Y    - Plan a route");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
