//! YouTube URL resolution and video identifiers.
//!
//! URLs are treated as untrusted input: only whitelisted YouTube hosts are
//! accepted (exact match or subdomain), and video IDs are strictly validated
//! (11 characters, alphanumeric plus `-` and `_`). No network I/O happens
//! here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Hosts accepted for video URLs. A host matches if it equals an entry or is
/// a subdomain of one (`www.youtube.com`, `m.youtube.com`, ...).
const ALLOWED_HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];

/// Length of a YouTube video identifier.
const VIDEO_ID_LEN: usize = 11;

/// Errors that can occur while resolving a video URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoIdError {
    #[error("URL is not a valid YouTube URL")]
    InvalidUrl,
    #[error("video ID has invalid format")]
    InvalidVideoId,
    #[error("video ID not found in URL")]
    VideoIdNotFound,
}

/// Result type for URL resolution.
pub type VideoIdResult<T> = Result<T, VideoIdError>;

/// A validated 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Validate a raw string as a video identifier.
    pub fn parse(raw: &str) -> VideoIdResult<Self> {
        if raw.len() != VIDEO_ID_LEN {
            return Err(VideoIdError::InvalidVideoId);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(VideoIdError::InvalidVideoId);
        }
        Ok(Self(raw.to_string()))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve a video URL to its identifier.
///
/// Supported shapes:
/// - `https://youtu.be/VIDEO_ID`
/// - `https://www.youtube.com/watch?v=VIDEO_ID`
/// - `https://www.youtube.com/{v,embed,shorts,live}/VIDEO_ID`
///
/// Any malformed URL, non-whitelisted host, or missing/invalid identifier
/// yields an error.
pub fn resolve_video_id(raw_url: &str) -> VideoIdResult<VideoId> {
    let url = Url::parse(raw_url.trim()).map_err(|_| VideoIdError::InvalidUrl)?;

    let host = url
        .host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or(VideoIdError::InvalidUrl)?;

    if !is_allowed_host(&host) {
        return Err(VideoIdError::InvalidUrl);
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    // Short-link form: the ID is the first path segment.
    if host == "youtu.be" || host.ends_with(".youtu.be") {
        return match segments.first() {
            Some(id) => VideoId::parse(id),
            None => Err(VideoIdError::VideoIdNotFound),
        };
    }

    // Canonical watch URL: /watch?v=VIDEO_ID
    if segments.first() == Some(&"watch") {
        return match url.query_pairs().find(|(k, _)| k == "v") {
            Some((_, v)) => VideoId::parse(&v),
            None => Err(VideoIdError::VideoIdNotFound),
        };
    }

    // Path forms: /v/ID, /embed/ID, /shorts/ID, /live/ID
    if let Some(first) = segments.first() {
        if matches!(*first, "v" | "embed" | "shorts" | "live") {
            return match segments.get(1) {
                Some(id) => VideoId::parse(id),
                None => Err(VideoIdError::VideoIdNotFound),
            };
        }
    }

    Err(VideoIdError::VideoIdNotFound)
}

/// Check a lowercased host against the allow-list (exact or subdomain).
fn is_allowed_host(host: &str) -> bool {
    ALLOWED_HOSTS
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{allowed}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_standard_watch_url() {
        let id = resolve_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn resolves_short_url() {
        let id = resolve_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn resolves_short_url_with_timestamp_query() {
        let id = resolve_video_id("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn resolves_path_forms() {
        for url in [
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
        ] {
            let id = resolve_video_id(url).unwrap();
            assert_eq!(id.as_str(), "dQw4w9WgXcQ", "failed for {url}");
        }
    }

    #[test]
    fn resolves_subdomain_hosts() {
        for url in [
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
        ] {
            assert!(resolve_video_id(url).is_ok(), "failed for {url}");
        }
    }

    #[test]
    fn resolves_watch_url_with_extra_params() {
        let id =
            resolve_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLx&t=30").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn rejects_non_youtube_host() {
        assert_eq!(
            resolve_video_id("https://example.com/watch?v=dQw4w9WgXcQ"),
            Err(VideoIdError::InvalidUrl)
        );
        assert_eq!(
            resolve_video_id("https://vimeo.com/123456789"),
            Err(VideoIdError::InvalidUrl)
        );
    }

    #[test]
    fn rejects_lookalike_host() {
        assert_eq!(
            resolve_video_id("https://evil-youtube.com/watch?v=dQw4w9WgXcQ"),
            Err(VideoIdError::InvalidUrl)
        );
    }

    #[test]
    fn rejects_embedded_youtube_query_on_foreign_host() {
        assert_eq!(
            resolve_video_id(
                "https://example.com/redirect?target=https://youtube.com/watch?v=dQw4w9WgXcQ"
            ),
            Err(VideoIdError::InvalidUrl)
        );
    }

    #[test]
    fn rejects_malformed_url() {
        assert_eq!(
            resolve_video_id("not a url at all"),
            Err(VideoIdError::InvalidUrl)
        );
    }

    #[test]
    fn rejects_missing_id() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch"),
            Err(VideoIdError::VideoIdNotFound)
        );
        assert_eq!(
            resolve_video_id("https://youtu.be/"),
            Err(VideoIdError::VideoIdNotFound)
        );
        assert_eq!(
            resolve_video_id("https://www.youtube.com/embed/"),
            Err(VideoIdError::VideoIdNotFound)
        );
    }

    #[test]
    fn rejects_invalid_id_format() {
        // Too short
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?v=abc123"),
            Err(VideoIdError::InvalidVideoId)
        );
        // Invalid characters
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?v=abc123def!!"),
            Err(VideoIdError::InvalidVideoId)
        );
    }

    #[test]
    fn watch_url_round_trip() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(
            id.watch_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(resolve_video_id(&id.watch_url()).unwrap(), id);
    }
}
