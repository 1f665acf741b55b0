//! Classification of yt-dlp diagnostic output into engine errors.

use crate::error::EngineError;

/// Diagnostic substrings yt-dlp emits when a video does not exist.
const NOT_FOUND_MARKERS: &[&str] = &[
    "Video unavailable",
    "is not a valid URL",
    "Incomplete YouTube ID",
];

/// Markers for upstream throttling.
const RATE_LIMIT_MARKERS: &[&str] = &["429", "Too Many Requests"];

/// Markers for videos that require authentication or are private.
const ACCESS_DENIED_MARKERS: &[&str] = &["Private video", "Sign in"];

/// Translate the tool's stderr text into an `EngineError`.
///
/// Pure pattern match; anything unrecognized maps to `Unknown` carrying the
/// raw diagnostic text so it stays observable.
pub fn classify_tool_error(stderr: &str) -> EngineError {
    let detail = last_nonempty_line(stderr);

    if NOT_FOUND_MARKERS.iter().any(|m| stderr.contains(m)) {
        return EngineError::VideoNotFound(detail);
    }
    if RATE_LIMIT_MARKERS.iter().any(|m| stderr.contains(m)) {
        return EngineError::RateLimited(detail);
    }
    if ACCESS_DENIED_MARKERS.iter().any(|m| stderr.contains(m)) {
        return EngineError::AccessDenied(detail);
    }
    EngineError::Unknown(detail)
}

/// Last non-empty stderr line, or a placeholder when there is none.
fn last_nonempty_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("tool exited with non-zero status and empty stderr")
        .to_string()
}
