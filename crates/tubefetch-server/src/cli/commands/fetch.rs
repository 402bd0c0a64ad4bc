//! `tubefetch fetch` – one-shot download through the API's pipeline.

use anyhow::{Context, Result};
use std::path::Path;
use tubefetch_core::config::TubefetchConfig;
use tubefetch_core::request::DownloadMode;

use super::setup::build_fetcher;

pub async fn run_fetch(cfg: &TubefetchConfig, url: &str, mode: &str, output_dir: &Path) -> Result<()> {
    let mode: DownloadMode = mode.parse()?;
    let fetcher = build_fetcher(cfg)?;
    println!(
        "Downloading {} ({}) into {} (up to {} attempt(s))",
        url,
        mode,
        output_dir.display(),
        fetcher.policy().attempts()
    );
    let outcome = fetcher
        .fetch_mode(url, mode, output_dir)
        .await
        .with_context(|| format!("{mode} download of {url} failed"))?;
    println!("{}", outcome.message);
    Ok(())
}
