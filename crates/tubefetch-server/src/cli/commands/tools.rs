//! `tubefetch tools` – show resolved external binaries.

use anyhow::Result;
use std::path::Path;
use tubefetch_core::config::TubefetchConfig;
use tubefetch_core::engine::{self, Tool};

pub async fn run_tools(cfg: &TubefetchConfig) -> Result<()> {
    let binaries = engine::discover(&cfg.engine)?;
    for (tool, path) in [(Tool::YtDlp, &binaries.ytdlp), (Tool::Ffmpeg, &binaries.ffmpeg)] {
        print_tool(tool, path).await;
    }
    Ok(())
}

async fn print_tool(tool: Tool, path: &Path) {
    let version = engine::tool_version(tool, path)
        .await
        .unwrap_or_else(|| "unknown version".to_string());
    println!("{:<8} {}  ({})", tool, path.display(), version);
}
