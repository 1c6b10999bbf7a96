mod api;
mod cli;
mod router;
mod state;
mod upload;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use pdfqa_ingest::PdfExtractor;
use pdfqa_llm::CompletionClient;

use crate::cli::ServeArgs;
use crate::state::AppState;

fn load_config() -> pdfqa_core::Config {
    pdfqa_core::config::load_dotenv();
    pdfqa_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let args = ServeArgs::parse();
    let config = load_config();
    config.validate().context("invalid configuration")?;
    config.log_summary();

    // A missing token is not fatal: every completion call reports it instead.
    let completion = CompletionClient::from_config(&config.llm)
        .context("failed to build completion client")?;

    let state = Arc::new(AppState {
        extractor: Arc::new(PdfExtractor),
        completion,
        temp_dir: std::env::temp_dir(),
    });

    let app = router::build_router(state, router::cors_layer(&config.server.cors_origin));

    let addr = args.bind_addr(&config.server);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
