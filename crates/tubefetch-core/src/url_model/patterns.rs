//! Compiled YouTube URL patterns.
//!
//! Video patterns are checked in the order of [`VIDEO_PATTERNS`]: watch,
//! short link, shorts. They cannot overlap, but the order is fixed so that
//! classification is deterministic.

use regex::Regex;
use std::sync::LazyLock;

/// Host tokens an input must mention before any pattern is tried.
static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(youtube\.com|youtu\.be)").expect("host pattern"));

static WATCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=)([A-Za-z0-9_-]{11})").expect("watch pattern")
});

static SHORT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:youtu\.be/)([A-Za-z0-9_-]{11})").expect("short link pattern"));

static SHORTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/shorts/)([A-Za-z0-9_-]{11})").expect("shorts pattern")
});

static PLAYLIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/playlist\?list=)([A-Za-z0-9_-]+)").expect("playlist pattern")
});

/// Which video URL shape matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPattern {
    Watch,
    ShortLink,
    Shorts,
}

/// Video patterns in match order.
pub const VIDEO_PATTERNS: [VideoPattern; 3] = [
    VideoPattern::Watch,
    VideoPattern::ShortLink,
    VideoPattern::Shorts,
];

impl VideoPattern {
    fn regex(self) -> &'static Regex {
        match self {
            VideoPattern::Watch => &*WATCH_RE,
            VideoPattern::ShortLink => &*SHORT_LINK_RE,
            VideoPattern::Shorts => &*SHORTS_RE,
        }
    }
}

pub(super) fn mentions_supported_host(url: &str) -> bool {
    HOST_RE.is_match(url)
}

/// Returns the 11-character video id from the first matching video pattern.
pub(super) fn match_video_id(url: &str) -> Option<(VideoPattern, &str)> {
    VIDEO_PATTERNS.iter().find_map(|pattern| {
        pattern
            .regex()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| (*pattern, m.as_str()))
    })
}

pub(super) fn match_playlist_id(url: &str) -> Option<&str> {
    PLAYLIST_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_tokens() {
        assert!(mentions_supported_host("https://www.youtube.com/watch?v=x"));
        assert!(mentions_supported_host("youtu.be/abc"));
        assert!(!mentions_supported_host("https://vimeo.com/123"));
    }

    #[test]
    fn each_video_shape_reports_its_pattern() {
        assert_eq!(
            match_video_id("https://www.youtube.com/watch?v=olUDirBTsTY"),
            Some((VideoPattern::Watch, "olUDirBTsTY"))
        );
        assert_eq!(
            match_video_id("https://youtu.be/olUDirBTsTY"),
            Some((VideoPattern::ShortLink, "olUDirBTsTY"))
        );
        assert_eq!(
            match_video_id("https://youtube.com/shorts/olUDirBTsTY"),
            Some((VideoPattern::Shorts, "olUDirBTsTY"))
        );
    }

    #[test]
    fn short_ids_do_not_match() {
        assert_eq!(match_video_id("https://youtu.be/abc"), None);
    }

    #[test]
    fn playlist_token_is_variable_length() {
        assert_eq!(
            match_playlist_id("https://youtube.com/playlist?list=PL123"),
            Some("PL123")
        );
        assert_eq!(
            match_playlist_id("https://www.youtube.com/playlist?list=PLa_b-c9&si=x"),
            Some("PLa_b-c9")
        );
        assert_eq!(match_playlist_id("https://youtube.com/playlist"), None);
    }
}
