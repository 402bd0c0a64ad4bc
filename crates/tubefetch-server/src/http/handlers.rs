use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tubefetch_core::fetch::FetchError;
use tubefetch_core::request::{DownloadOutcome, DownloadRequest};

use super::{ApiError, AppState};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "API is running" }))
}

/// `POST /download`. Mode is checked before the orchestrator runs.
pub async fn download(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadOutcome>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "rejected download request body");
        ApiError::bad_request("Request body must be JSON with 'url' and 'mode' fields")
    })?;

    let mode = request.parse_mode().map_err(|e| {
        tracing::warn!(url = %request.url, mode = %e.given, "rejected download mode");
        ApiError::from(e)
    })?;

    tracing::info!(url = %request.url, %mode, "download requested");
    match state
        .fetcher
        .fetch_mode(&request.url, mode, &state.output_dir)
        .await
    {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e @ FetchError::InvalidUrl(_)) => {
            tracing::warn!(url = %request.url, %mode, error = %e, "download request rejected");
            Err(ApiError::from(e))
        }
        Err(e) => {
            tracing::error!(url = %request.url, %mode, error = %e, "download request failed");
            Err(ApiError::from(e))
        }
    }
}
