//! Extraction engine seam.
//!
//! The orchestrator only depends on [`ExtractionEngine`]; the production
//! implementation drives the yt-dlp binary (with ffmpeg for muxing and
//! transcoding) through a declarative [`ExtractionOptions`] value.

mod binaries;
mod options;
mod ytdlp;

pub use binaries::{discover, discover_with, tool_version, BinaryError, Binaries, Tool};
pub use options::{AudioExtraction, EngineProfile, ExtractionOptions, OUTPUT_TEMPLATE};
pub use ytdlp::YtDlpEngine;

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single extraction attempt. All variants are retryable.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("extraction exited with {}: {stderr}", exit_label(.status))]
    Failed { status: Option<i32>, stderr: String },
    #[error("extraction timed out after {after:?}")]
    TimedOut { after: Duration },
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

/// Something that turns [`ExtractionOptions`] into files on disk.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Name of the engine (for logging).
    fn name(&self) -> &'static str;

    /// Run one extraction attempt. Returning `Ok` means the files exist.
    async fn extract(&self, options: &ExtractionOptions) -> Result<(), EngineError>;
}
