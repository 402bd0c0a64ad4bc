//! `tubefetch serve` – run the HTTP API.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tubefetch_core::config::TubefetchConfig;

use super::setup::build_fetcher;
use crate::http::{self, AppState};

pub async fn run_serve(cfg: &TubefetchConfig, bind: &str, output_dir: &Path) -> Result<()> {
    let fetcher = build_fetcher(cfg)?;
    let state = AppState::new(Arc::new(fetcher), output_dir);
    let app = http::router(state);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to listen on {bind}"))?;
    let local = listener.local_addr().context("listener has no local address")?;
    tracing::info!(addr = %local, output_dir = %output_dir.display(), "tubefetch API listening");
    println!("Listening on http://{local}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
