//! Startup wiring shared by `serve` and `fetch`.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tubefetch_core::config::TubefetchConfig;
use tubefetch_core::engine::{self, EngineProfile, YtDlpEngine};
use tubefetch_core::fetch::Fetcher;

/// Resolve binaries and build the orchestrator. A missing binary is fatal here,
/// before any request is accepted.
pub fn build_fetcher(cfg: &TubefetchConfig) -> Result<Fetcher> {
    let binaries = engine::discover(&cfg.engine).context("external tools unavailable")?;
    let timeout = cfg.engine.attempt_timeout_secs.map(Duration::from_secs);
    let ytdlp = YtDlpEngine::new(&binaries.ytdlp).with_timeout(timeout);
    let profile = EngineProfile::new(&cfg.engine, &binaries.ffmpeg);
    let policy = cfg.retry.policy()?;
    tracing::debug!(?policy, ?timeout, "engine ready");
    Ok(Fetcher::new(Arc::new(ytdlp), profile, policy))
}
