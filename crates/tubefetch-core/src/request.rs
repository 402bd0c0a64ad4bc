//! Request and outcome types shared by the HTTP API and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Media kind of a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Video,
    Audio,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Video => "video",
            Target::Audio => "audio",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Mode must be 'video', 'audio' or 'both'")]
pub struct ModeError {
    pub given: String,
}

/// Requested download mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    Video,
    Audio,
    Both,
}

impl DownloadMode {
    /// Fetch targets in execution order.
    pub fn targets(self) -> &'static [Target] {
        match self {
            DownloadMode::Video => &[Target::Video],
            DownloadMode::Audio => &[Target::Audio],
            DownloadMode::Both => &[Target::Video, Target::Audio],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DownloadMode::Video => "video",
            DownloadMode::Audio => "audio",
            DownloadMode::Both => "both",
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for DownloadMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(DownloadMode::Video),
            "audio" => Ok(DownloadMode::Audio),
            "both" => Ok(DownloadMode::Both),
            _ => Err(ModeError {
                given: s.to_string(),
            }),
        }
    }
}

/// Body of `POST /download`. `mode` stays a string until parsed so that an
/// unknown mode maps to a 400 rather than a deserialisation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub mode: String,
}

impl DownloadRequest {
    pub fn parse_mode(&self) -> Result<DownloadMode, ModeError> {
        self.mode.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failure,
}

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    pub status: OutcomeStatus,
    pub mode: DownloadMode,
    pub message: String,
}

impl DownloadOutcome {
    pub fn completed(mode: DownloadMode) -> Self {
        Self {
            status: OutcomeStatus::Success,
            mode,
            message: "Download completed".to_string(),
        }
    }
}
