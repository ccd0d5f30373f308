//! Café list HTTP microservice binary.
//!
//! # Configuration
//!
//! - `CAFELIST_CATALOG_PATH` - CSV catalog to serve (default: built-in catalog)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint settings

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{error, info};

use cafelist_service::router;
use cafelist_service_shared::{init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("cafelist");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let catalog_path = env::var_os("CAFELIST_CATALOG_PATH").map(PathBuf::from);
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let catalog_label = catalog_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<built-in>".to_string());
    info!(catalog = %catalog_label, port = port, "starting cafe list service");

    let state = AppState::load(catalog_path.as_deref()).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(
        cities = state.catalog().city_count(),
        cafes = state.catalog().cafe_count(),
        "application state loaded"
    );

    let app = router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
