//! Error types for the transcript engine.
//!
//! `EngineError` is the only error representation that crosses the engine
//! boundary. Unclassified failures from I/O layers fold into `Unknown` so the
//! caller-facing contract stays closed over these seven kinds.

use thiserror::Error;
use ytscribe_models::VideoIdError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during transcript acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("video not found: {0}")]
    VideoNotFound(String),

    #[error("rate limited by the caption source: {0}")]
    RateLimited(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("no subtitles available: {0}")]
    NoSubtitles(String),

    #[error("operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("caption tool failed: {0}")]
    Unknown(String),
}

impl EngineError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    pub fn no_subtitles(msg: impl Into<String>) -> Self {
        Self::NoSubtitles(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Stable machine-readable kind, used in the caller-facing JSON contract.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidUrl(_) => "INVALID_URL",
            EngineError::VideoNotFound(_) => "VIDEO_NOT_FOUND",
            EngineError::RateLimited(_) => "RATE_LIMITED",
            EngineError::AccessDenied(_) => "ACCESS_DENIED",
            EngineError::NoSubtitles(_) => "NO_SUBTITLES",
            EngineError::Timeout(_) => "TIMEOUT",
            EngineError::Unknown(_) => "UNKNOWN",
        }
    }

    /// HTTP-style status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::InvalidUrl(_) => 400,
            EngineError::AccessDenied(_) => 403,
            EngineError::VideoNotFound(_) | EngineError::NoSubtitles(_) => 404,
            EngineError::RateLimited(_) => 429,
            EngineError::Unknown(_) => 500,
            EngineError::Timeout(_) => 504,
        }
    }

    /// The only kind the acquisition cascade treats as retryable.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, EngineError::RateLimited(_))
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Unknown(format!("I/O error: {e}"))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Unknown(format!("JSON parse error: {e}"))
    }
}

impl From<VideoIdError> for EngineError {
    fn from(e: VideoIdError) -> Self {
        EngineError::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_kinds() {
        let cases = [
            (EngineError::invalid_url("x"), "INVALID_URL", 400),
            (EngineError::AccessDenied("x".into()), "ACCESS_DENIED", 403),
            (EngineError::VideoNotFound("x".into()), "VIDEO_NOT_FOUND", 404),
            (EngineError::no_subtitles("x"), "NO_SUBTITLES", 404),
            (EngineError::RateLimited("x".into()), "RATE_LIMITED", 429),
            (EngineError::unknown("x"), "UNKNOWN", 500),
            (EngineError::Timeout(30), "TIMEOUT", 504),
        ];
        for (err, kind, status) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn io_errors_fold_into_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = EngineError::from(io);
        assert_eq!(err.kind(), "UNKNOWN");
    }

    #[test]
    fn only_rate_limited_is_retryable() {
        assert!(EngineError::RateLimited("x".into()).is_rate_limited());
        assert!(!EngineError::Timeout(30).is_rate_limited());
        assert!(!EngineError::no_subtitles("x").is_rate_limited());
    }
}
