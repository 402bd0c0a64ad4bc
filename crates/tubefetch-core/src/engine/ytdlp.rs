//! yt-dlp child-process engine.

use super::{EngineError, ExtractionEngine, ExtractionOptions};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// How much of yt-dlp's stderr is kept in an error.
const STDERR_TAIL_LINES: usize = 12;

/// Runs the yt-dlp binary once per attempt.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl YtDlpEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill an attempt after `timeout`. Without one, a hung attempt waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract(&self, options: &ExtractionOptions) -> Result<(), EngineError> {
        let args = options.to_args();
        tracing::debug!("running {} {}", self.program.display(), args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| EngineError::TimedOut { after: limit })?,
            None => child.wait_with_output().await,
        }
        .map_err(|source| EngineError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            if line.contains("Destination") || line.contains("[Merger]") || line.contains("[ExtractAudio]") {
                tracing::debug!("[yt-dlp] {}", line);
            }
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(EngineError::Failed {
                status: output.status.code(),
                stderr: stderr_tail(&output.stderr),
            })
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
