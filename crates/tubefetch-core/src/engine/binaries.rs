//! Startup-time lookup of the yt-dlp and ffmpeg binaries.
//!
//! Runs once before the server accepts requests; a missing binary is a fatal
//! configuration error, never a per-request failure.

use crate::config::EngineConfig;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

pub const YTDLP_ENV: &str = "TUBEFETCH_YTDLP";
pub const FFMPEG_ENV: &str = "TUBEFETCH_FFMPEG";

/// Install locations checked for yt-dlp before falling back to `PATH`.
const COMMON_DIRS: [&str; 3] = ["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    YtDlp,
    Ffmpeg,
}

impl Tool {
    pub fn binary_name(self) -> &'static str {
        match self {
            Tool::YtDlp => "yt-dlp",
            Tool::Ffmpeg => "ffmpeg",
        }
    }

    fn env_var(self) -> &'static str {
        match self {
            Tool::YtDlp => YTDLP_ENV,
            Tool::Ffmpeg => FFMPEG_ENV,
        }
    }

    fn version_arg(self) -> &'static str {
        match self {
            Tool::YtDlp => "--version",
            Tool::Ffmpeg => "-version",
        }
    }

    fn file_name(self) -> String {
        format!("{}{}", self.binary_name(), env::consts::EXE_SUFFIX)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

#[derive(Debug, Error)]
#[error("{tool} not found (set {} or configure a path); searched: {}", .tool.env_var(), format_searched(.searched))]
pub struct BinaryError {
    pub tool: Tool,
    pub searched: Vec<PathBuf>,
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "nothing".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolved external binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binaries {
    pub ytdlp: PathBuf,
    pub ffmpeg: PathBuf,
}

/// Discover binaries using the process environment and the executable's directory.
pub fn discover(cfg: &EngineConfig) -> Result<Binaries, BinaryError> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    discover_with(cfg, |key| env::var_os(key), exe_dir.as_deref())
}

/// Discovery with injectable environment lookup and bundle directory.
///
/// ffmpeg: `TUBEFETCH_FFMPEG`, then `engine.ffmpeg_path`, then the bundled
/// `ffmpeg` next to the executable.
/// yt-dlp: `TUBEFETCH_YTDLP`, then `engine.ytdlp_path`, then the bundled copy,
/// then well-known install dirs, then `PATH`.
pub fn discover_with<F>(
    cfg: &EngineConfig,
    env_lookup: F,
    exe_dir: Option<&Path>,
) -> Result<Binaries, BinaryError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let ffmpeg = {
        let candidates = explicit_candidates(Tool::Ffmpeg, &env_lookup, cfg.ffmpeg_path.as_deref())
            .into_iter()
            .chain(bundled_candidate(Tool::Ffmpeg, exe_dir))
            .collect();
        first_existing(Tool::Ffmpeg, candidates)?
    };

    let ytdlp = {
        let mut candidates: Vec<PathBuf> =
            explicit_candidates(Tool::YtDlp, &env_lookup, cfg.ytdlp_path.as_deref())
                .into_iter()
                .chain(bundled_candidate(Tool::YtDlp, exe_dir))
                .collect();
        candidates.extend(COMMON_DIRS.iter().map(|dir| Path::new(dir).join(Tool::YtDlp.file_name())));
        if let Some(path_var) = env_lookup("PATH") {
            candidates.extend(env::split_paths(&path_var).map(|dir| dir.join(Tool::YtDlp.file_name())));
        }
        first_existing(Tool::YtDlp, candidates)?
    };

    tracing::info!(ytdlp = %ytdlp.display(), ffmpeg = %ffmpeg.display(), "resolved external binaries");
    Ok(Binaries { ytdlp, ffmpeg })
}

fn explicit_candidates<F>(tool: Tool, env_lookup: &F, configured: Option<&Path>) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let mut out = Vec::new();
    if let Some(value) = env_lookup(tool.env_var()).filter(|v| !v.is_empty()) {
        out.push(PathBuf::from(value));
    }
    if let Some(path) = configured {
        out.push(path.to_path_buf());
    }
    out
}

fn bundled_candidate(tool: Tool, exe_dir: Option<&Path>) -> Option<PathBuf> {
    exe_dir.map(|dir| dir.join(tool.file_name()))
}

fn first_existing(tool: Tool, candidates: Vec<PathBuf>) -> Result<PathBuf, BinaryError> {
    for candidate in &candidates {
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
        tracing::debug!("{} not at {}", tool, candidate.display());
    }
    Err(BinaryError {
        tool,
        searched: candidates,
    })
}

/// First line of `<binary> --version` (or `-version` for ffmpeg), if it runs.
pub async fn tool_version(tool: Tool, path: &Path) -> Option<String> {
    let output = Command::new(path)
        .arg(tool.version_arg())
        .stdin(Stdio::null())
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}
