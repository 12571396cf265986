//! Axum API server binary.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use joblinks_api::{create_router, metrics, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // rustls 0.23 needs an explicit process-wide provider.
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    init_tracing()?;
    info!("Starting joblinks-api");

    let config = ApiConfig::from_env().context("Invalid API configuration")?;
    info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        "API config loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        info!("Prometheus metrics enabled at /metrics");
        Some(metrics::init_metrics().context("Failed to install Prometheus recorder")?)
    } else {
        None
    };

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid bind address")?;

    let state = AppState::new(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create application state: {e}"))?;

    let app = create_router(state, metrics_handle);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Coloured output for development, JSON when `LOG_FORMAT=json`.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("joblinks=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
