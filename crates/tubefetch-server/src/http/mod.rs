//! HTTP API: `POST /download` and a health check.

mod error;
mod handlers;

pub use error::ApiError;

use axum::routing::{get, post};
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tubefetch_core::fetch::Fetcher;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<Fetcher>,
    pub output_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(fetcher: Arc<Fetcher>, output_dir: &Path) -> Self {
        Self {
            fetcher,
            output_dir: Arc::new(output_dir.to_path_buf()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/download", post(handlers::download))
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors_layer())
}

/// Any origin, method and header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests;
