//! URL validation and canonicalisation.
//!
//! Classifies a caller-supplied YouTube URL as a single video or a playlist
//! and rebuilds a minimal canonical URL from the captured identifier. Only the
//! canonical form is handed to the extraction engine; tracking parameters and
//! alternate hostnames never reach it.

mod patterns;

pub use patterns::{VideoPattern, VIDEO_PATTERNS};

use serde::Serialize;
use std::fmt;
use thiserror::Error;

const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
const PLAYLIST_BASE: &str = "https://www.youtube.com/playlist?list=";

/// Why an input URL was rejected. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("URL must be a non-empty string")]
    Empty,
    #[error("Not a valid YouTube URL")]
    UnsupportedHost,
    #[error("Invalid YouTube URL format")]
    UnrecognizedFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    Video,
    Playlist,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UrlKind::Video => "video",
            UrlKind::Playlist => "playlist",
        })
    }
}

/// A URL that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedUrl {
    pub kind: UrlKind,
    /// 11-character video id, or the playlist token.
    pub id: String,
    /// Minimal URL rebuilt from `id`.
    pub canonical_url: String,
}

/// Validates `url` and returns its kind, id and canonical URL.
///
/// # Examples
///
/// - `"https://youtu.be/olUDirBTsTY?si=abc"` → video `olUDirBTsTY`,
///   `https://www.youtube.com/watch?v=olUDirBTsTY`
/// - `"https://youtube.com/playlist?list=PL123"` → playlist `PL123`,
///   `https://www.youtube.com/playlist?list=PL123`
pub fn validate(url: &str) -> Result<ValidatedUrl, UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::Empty);
    }
    if !patterns::mentions_supported_host(url) {
        return Err(UrlError::UnsupportedHost);
    }

    if let Some((pattern, id)) = patterns::match_video_id(url) {
        tracing::trace!(?pattern, id, "matched video pattern");
        return Ok(ValidatedUrl {
            kind: UrlKind::Video,
            id: id.to_string(),
            canonical_url: format!("{WATCH_BASE}{id}"),
        });
    }

    if let Some(id) = patterns::match_playlist_id(url) {
        return Ok(ValidatedUrl {
            kind: UrlKind::Playlist,
            id: id.to_string(),
            canonical_url: format!("{PLAYLIST_BASE}{id}"),
        });
    }

    Err(UrlError::UnrecognizedFormat)
}
