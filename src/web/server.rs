//! HTTP server setup for the dashboard API

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use super::api::{api_router, ApiState};
use crate::state::SharedRecordStore;

/// Web server configuration
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// Allowed browser origin; `None` allows any
    pub cors_origin: Option<String>,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: None,
        }
    }
}

impl WebServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origin: std::env::var("CORS_ORIGIN")
                .ok()
                .filter(|s| !s.trim().is_empty() && s.trim() != "*"),
        }
    }
}

fn cors_layer(config: &WebServerConfig) -> CorsLayer {
    let origin = match config
        .cors_origin
        .as_deref()
        .map(|o| o.parse::<HeaderValue>())
    {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ORIGIN: {}", e);
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve the JSON API until Ctrl+C
fn build_app(config: &WebServerConfig, store: SharedRecordStore) -> axum::Router {
    api_router(ApiState { store }).layer(cors_layer(config))
}

pub async fn start_web_server(
    config: WebServerConfig,
    store: SharedRecordStore,
) -> anyhow::Result<()> {
    let app = build_app(&config, store);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", config.bind_address, e))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web server listening on http://{}", listener.local_addr()?);
    match &config.cors_origin {
        Some(origin) => info!("CORS restricted to {}", origin),
        None => info!("CORS allows any origin"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
