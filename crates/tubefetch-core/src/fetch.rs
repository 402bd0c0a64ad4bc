//! Download orchestrator.
//!
//! One fetch moves through `Validating → Configuring → Attempting(n)` and ends
//! in `Success`, `Failed:Validation` or `Failed:Exhausted`. Validation happens
//! once, before the output directory is touched; only engine failures are
//! retried.

use crate::engine::{EngineError, EngineProfile, ExtractionEngine};
use crate::request::{DownloadMode, DownloadOutcome, Target};
use crate::retry::{run_with_retry, RetryPolicy};
use crate::url_model::{self, UrlError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Input URL rejected; no attempt was made.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{target} download failed after {attempts} attempt(s): {last}")]
    ExhaustedRetries {
        target: Target,
        attempts: u32,
        #[source]
        last: EngineError,
    },
}

/// Wraps an [`ExtractionEngine`] with validation, directory setup and retries.
pub struct Fetcher {
    engine: Arc<dyn ExtractionEngine>,
    profile: EngineProfile,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(engine: Arc<dyn ExtractionEngine>, profile: EngineProfile, policy: RetryPolicy) -> Self {
        Self {
            engine,
            profile,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch one target with the configured attempt cap.
    pub async fn fetch(&self, url: &str, target: Target, output_dir: &Path) -> Result<(), FetchError> {
        self.fetch_with_attempts(url, target, output_dir, self.policy.attempts())
            .await
    }

    /// Fetch one target making at most `max_attempts` extraction attempts.
    pub async fn fetch_with_attempts(
        &self,
        url: &str,
        target: Target,
        output_dir: &Path,
        max_attempts: u32,
    ) -> Result<(), FetchError> {
        let validated = url_model::validate(url).map_err(|e| {
            tracing::warn!(%target, error = %e, "rejected URL");
            e
        })?;
        let url = validated.canonical_url.as_str();

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| FetchError::OutputDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let options = self.profile.options(target, &validated, output_dir);
        let policy = self.policy.with_max_attempts(max_attempts);
        tracing::info!(
            url,
            %target,
            engine = self.engine.name(),
            max_attempts = policy.attempts(),
            "starting download"
        );

        let engine = &self.engine;
        let options = &options;
        run_with_retry(&policy, |attempt| async move {
            tracing::debug!(url, %target, attempt, "extraction attempt");
            engine.extract(options).await
        })
        .await
        .map_err(|e| FetchError::ExhaustedRetries {
            target,
            attempts: e.attempts,
            last: e.last,
        })?;

        tracing::info!(url, %target, output_dir = %output_dir.display(), "download completed");
        Ok(())
    }

    /// Fetch every target of `mode` in order. The first failure aborts the
    /// remaining targets.
    pub async fn fetch_mode(
        &self,
        url: &str,
        mode: DownloadMode,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, FetchError> {
        let mut completed: Vec<Target> = Vec::new();
        for &target in mode.targets() {
            if let Err(e) = self.fetch(url, target, output_dir).await {
                if !completed.is_empty() {
                    tracing::error!(%mode, ?completed, failed = %target, "partial download: aborting remaining targets");
                }
                return Err(e);
            }
            completed.push(target);
        }
        Ok(DownloadOutcome::completed(mode))
    }
}
