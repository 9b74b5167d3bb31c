//! Webhook Receiver - HTTP endpoint that logs incoming webhook messages.
//!
//! Listens on all interfaces, port 9090, and serves `POST /webhook` behind a
//! permissive CORS layer.

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webhook_receiver::{Config, LogFormat, WebhookServer, LISTEN_PORT};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, invalid) = Config::from_env();
    init_tracing(config.log_format);

    for var in &invalid {
        warn!(env_var = var.name, value = %var.value, "Invalid value, using default");
    }
    info!(log_format = ?config.log_format, "config_loaded");

    info!("Starting server on :{LISTEN_PORT}");

    if let Err(e) = serve(&config).await {
        error!("Server failed: {e:#}");
        return Err(e);
    }

    info!("web_server_shutdown_complete");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

async fn serve(config: &Config) -> Result<()> {
    let server = WebhookServer::bind(config.bind_addr())
        .await
        .context("Failed to bind to address")?;

    server
        .run(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
