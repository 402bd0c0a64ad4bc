//! Declarative yt-dlp options and their rendering into CLI arguments.

use crate::config::EngineConfig;
use crate::request::Target;
use crate::url_model::{UrlKind, ValidatedUrl};
use std::path::{Path, PathBuf};

/// Output file name template; yt-dlp fills in the title and extension.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Retry counts handed to yt-dlp itself (network and fragment level).
const ENGINE_RETRIES: u32 = 10;
const ENGINE_FRAGMENT_RETRIES: u32 = 10;

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioExtraction {
    pub codec: String,
    pub bitrate: String,
}

/// Everything one extraction attempt needs. Built once per fetch, reused
/// unchanged across retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Canonical URL; never the caller's raw input.
    pub url: String,
    pub playlist: bool,
    pub format: String,
    pub output_dir: PathBuf,
    pub output_template: String,
    pub restrict_filenames: bool,
    /// Container to merge separate video/audio streams into.
    pub merge_format: Option<String>,
    /// Container to remux the final video into.
    pub remux_format: Option<String>,
    pub extract_audio: Option<AudioExtraction>,
    pub retries: u32,
    pub fragment_retries: u32,
    pub skip_unavailable_fragments: bool,
    pub check_certificates: bool,
    pub geo_bypass_country: String,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub player_clients: Vec<String>,
    pub cookie_file: Option<PathBuf>,
    pub ffmpeg_location: PathBuf,
}

impl ExtractionOptions {
    /// Render as yt-dlp arguments; the URL comes last.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--no-update".to_string(),
            "--newline".to_string(),
            "--no-progress".to_string(),
            if self.playlist {
                "--yes-playlist".to_string()
            } else {
                "--no-playlist".to_string()
            },
            "-f".to_string(),
            self.format.clone(),
            "-P".to_string(),
            self.output_dir.display().to_string(),
            "-o".to_string(),
            self.output_template.clone(),
            "--retries".to_string(),
            self.retries.to_string(),
            "--fragment-retries".to_string(),
            self.fragment_retries.to_string(),
            "--ffmpeg-location".to_string(),
            self.ffmpeg_location.display().to_string(),
        ];

        if self.restrict_filenames {
            args.push("--restrict-filenames".to_string());
        }
        if self.skip_unavailable_fragments {
            args.push("--skip-unavailable-fragments".to_string());
        }
        if !self.check_certificates {
            args.push("--no-check-certificates".to_string());
        }

        args.push("--geo-bypass-country".to_string());
        args.push(self.geo_bypass_country.clone());
        args.push("--user-agent".to_string());
        args.push(self.user_agent.clone());
        for (name, value) in &self.headers {
            args.push("--add-header".to_string());
            args.push(format!("{name}:{value}"));
        }
        if !self.player_clients.is_empty() {
            args.push("--extractor-args".to_string());
            args.push(format!("youtube:player_client={}", self.player_clients.join(",")));
        }
        if let Some(path) = &self.cookie_file {
            args.push("--cookies".to_string());
            args.push(path.display().to_string());
        }

        if let Some(fmt) = &self.merge_format {
            args.push("--merge-output-format".to_string());
            args.push(fmt.clone());
        }
        if let Some(fmt) = &self.remux_format {
            args.push("--remux-video".to_string());
            args.push(fmt.clone());
        }
        if let Some(audio) = &self.extract_audio {
            args.extend([
                "-x".to_string(),
                "--audio-format".to_string(),
                audio.codec.clone(),
                "--audio-quality".to_string(),
                audio.bitrate.clone(),
            ]);
        }

        args.push(self.url.clone());
        args
    }
}

/// Static per-process engine settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineProfile {
    pub user_agent: String,
    pub geo_bypass_country: String,
    pub player_clients: Vec<String>,
    pub merge_format: String,
    pub audio_format: String,
    pub audio_bitrate: String,
    pub cookie_file: Option<PathBuf>,
    pub ffmpeg_location: PathBuf,
}

impl EngineProfile {
    /// Build from config and the resolved ffmpeg binary. A configured cookie
    /// file that does not exist is dropped with a warning.
    pub fn new(cfg: &EngineConfig, ffmpeg: &Path) -> Self {
        let cookie_file = cfg.cookie_file.clone().filter(|path| {
            let exists = path.is_file();
            if !exists {
                tracing::warn!("cookie file {} not found; continuing without cookies", path.display());
            }
            exists
        });
        Self {
            user_agent: cfg.user_agent.clone(),
            geo_bypass_country: cfg.geo_bypass_country.clone(),
            player_clients: cfg.player_clients.clone(),
            merge_format: cfg.merge_format.clone(),
            audio_format: cfg.audio_format.clone(),
            audio_bitrate: cfg.audio_bitrate.clone(),
            cookie_file,
            ffmpeg_location: ffmpeg.to_path_buf(),
        }
    }

    /// Target-specific options for one validated URL.
    pub fn options(&self, target: Target, url: &ValidatedUrl, output_dir: &Path) -> ExtractionOptions {
        let (format, merge_format, remux_format, extract_audio) = match target {
            Target::Video => (
                "bestvideo+bestaudio/best",
                Some(self.merge_format.clone()),
                Some(self.merge_format.clone()),
                None,
            ),
            Target::Audio => (
                "bestaudio/best",
                None,
                None,
                Some(AudioExtraction {
                    codec: self.audio_format.clone(),
                    bitrate: self.audio_bitrate.clone(),
                }),
            ),
        };

        ExtractionOptions {
            url: url.canonical_url.clone(),
            playlist: url.kind == UrlKind::Playlist,
            format: format.to_string(),
            output_dir: output_dir.to_path_buf(),
            output_template: OUTPUT_TEMPLATE.to_string(),
            restrict_filenames: true,
            merge_format,
            remux_format,
            extract_audio,
            retries: ENGINE_RETRIES,
            fragment_retries: ENGINE_FRAGMENT_RETRIES,
            skip_unavailable_fragments: true,
            check_certificates: false,
            geo_bypass_country: self.geo_bypass_country.clone(),
            user_agent: self.user_agent.clone(),
            headers: vec![("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string())],
            player_clients: self.player_clients.clone(),
            cookie_file: self.cookie_file.clone(),
            ffmpeg_location: self.ffmpeg_location.clone(),
        }
    }
}
