use std::error::Error;

use distance_server::cache::DestinationCoordinateCache;
use distance_server::catalog::DestinationCatalog;
use distance_server::config::ServerConfig;
use distance_server::geocode::PostcodesClient;
use distance_server::orchestrator::RouteOrchestrator;
use distance_server::routing::OsrmClient;
use distance_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("distance_server=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let config = ServerConfig::from_env()?;

    // Without destinations there is nothing to compute
    let catalog = DestinationCatalog::load(&config.destinations_path)?;
    info!(
        path = %config.destinations_path.display(),
        destinations = catalog.len(),
        "loaded destination catalog"
    );

    let geocoder = PostcodesClient::new(config.geocode.clone())?;
    let router = OsrmClient::new(config.routing.clone())?;
    let cache = DestinationCoordinateCache::new();

    if config.warm_up {
        let report = cache
            .warm_up(&catalog, &geocoder, config.warm_up_concurrency)
            .await;
        if !report.unresolved.is_empty() {
            warn!(
                unresolved = report.unresolved.len(),
                "some destinations could not be geocoded; they will be retried per request"
            );
        }
    }

    let orchestrator = RouteOrchestrator::new(geocoder, router, cache);
    let state = AppState::new(orchestrator, catalog);
    let app = create_router(state, &config.static_dir, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Driving distance calculator listening on http://{}", config.bind_addr);
    info!("  GET  /        - Upload form");
    info!("  POST /        - Compute distances (multipart or urlencoded)");
    info!("  GET  /health  - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
