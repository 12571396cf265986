//! Front-end server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use joblinks_web::{create_router, ApiClient, WebConfig, WebState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

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

    let config = WebConfig::from_env().context("Invalid front-end configuration")?;
    info!(api = %config.api_base_url, "Starting joblinks-web");

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid bind address")?;
    let state = WebState {
        client: ApiClient::new(&config).context("Failed to build API client")?,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await
        .context("Server error")?;

    Ok(())
}
