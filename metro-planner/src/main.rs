use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use metro_planner::config::EngineConfig;
use metro_planner::planner::RouteEngine;
use metro_planner::web::{AppState, DEFAULT_STATIC_DIR, create_router};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_planner=info")),
        )
        .init();

    // Load the network once; it never changes while serving
    let config = match std::env::var("METRO_NETWORK_FILE") {
        Ok(path) => {
            info!(%path, "loading network");
            EngineConfig::from_json_file(&path).expect("Failed to load network configuration")
        }
        Err(_) => {
            warn!("METRO_NETWORK_FILE not set, using the built-in reference network");
            EngineConfig::default()
        }
    };
    let engine = RouteEngine::from(config);
    info!(
        stations = engine.network().len(),
        speed_kmh = engine.config().speed_kmh.get(),
        opens = %engine.config().opens,
        closes = %engine.config().closes,
        "route engine ready"
    );

    let static_dir =
        std::env::var("METRO_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

    // Build app state and router
    let state = AppState::new(engine);
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr: SocketAddr = std::env::var("METRO_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("METRO_BIND_ADDR must be a socket address");

    info!("Metro trip planner listening on http://{addr}");
    info!("  GET  /              - Booking page");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/stations  - Station list");
    info!("  POST /trip/plan     - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
