// lingolens - Gemini-backed OCR and translation HTTP gateway

use anyhow::Result;
use clap::Parser;
use lingolens::cli::Args;
use lingolens::config::AppConfig;
use lingolens::gemini::GeminiClient;
use lingolens::server::create_router;
use lingolens::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting lingolens v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the Gemini client (validates the API key is configured)
    let gemini_client = GeminiClient::new(&config.gemini)?;

    // Phase 3.5: Handle --check flag (provider connectivity probe)
    if args.check {
        info!("Checking Gemini API connectivity...");
        let latency = gemini_client.check_connectivity().await?;
        info!("Gemini API reachable in {:?}", latency);
    }

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), gemini_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
