use crate::retry::{Backoff, RetryPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry policy parameters (`[retry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of extraction attempts per target (including the first).
    pub max_attempts: u32,
    /// Delay in seconds after a failed attempt (first delay when exponential).
    pub delay_secs: f64,
    /// Upper bound in seconds for exponential delays. Fixed delays are not capped.
    pub max_delay_secs: u64,
    /// "fixed" (default) or "exponential".
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 2.0,
            max_delay_secs: 30,
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryConfig {
    /// Negative delays clamp to zero; delays too large for a `Duration` are rejected.
    pub fn policy(&self) -> Result<RetryPolicy> {
        let base_delay = Duration::try_from_secs_f64(self.delay_secs.max(0.0))
            .with_context(|| format!("invalid retry.delay_secs: {}", self.delay_secs))?;
        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay,
            max_delay: Duration::from_secs(self.max_delay_secs),
            backoff: self.backoff,
        })
    }
}

/// Static extraction-engine settings (`[engine]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Explicit yt-dlp binary. `TUBEFETCH_YTDLP` takes precedence.
    pub ytdlp_path: Option<PathBuf>,
    /// Fallback ffmpeg binary. `TUBEFETCH_FFMPEG` takes precedence; when unset
    /// the `ffmpeg` bundled next to the executable is used.
    pub ffmpeg_path: Option<PathBuf>,
    /// Netscape cookie file passed to yt-dlp when it exists.
    pub cookie_file: Option<PathBuf>,
    pub user_agent: String,
    /// Region used for geo-restriction bypass.
    pub geo_bypass_country: String,
    /// Player clients tried by the YouTube extractor, in order.
    pub player_clients: Vec<String>,
    /// Container for merged/remuxed video.
    pub merge_format: String,
    /// Codec for extracted audio.
    pub audio_format: String,
    /// Bitrate for extracted audio, e.g. "192K".
    pub audio_bitrate: String,
    /// Kill an attempt that runs longer than this. None = wait indefinitely.
    pub attempt_timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            cookie_file: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geo_bypass_country: "US".to_string(),
            player_clients: vec!["android".to_string(), "web".to_string()],
            merge_format: "mp4".to_string(),
            audio_format: "mp3".to_string(),
            audio_bitrate: "192K".to_string(),
            attempt_timeout_secs: None,
        }
    }
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Global configuration loaded from `~/.config/tubefetch/config.toml`.
///
/// Built once at startup and handed to each component; there is no
/// process-wide configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubefetchConfig {
    /// Address the HTTP API listens on.
    pub bind_addr: String,
    /// Directory downloads are written to (relative paths resolve against the cwd).
    pub output_dir: PathBuf,
    pub retry: RetryConfig,
    pub engine: EngineConfig,
}

impl Default for TubefetchConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            output_dir: PathBuf::from("downloads"),
            retry: RetryConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tubefetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TubefetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TubefetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. Missing keys take defaults.
pub fn load_from(path: &Path) -> Result<TubefetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: TubefetchConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
