#![deny(unreachable_patterns)]
//! Transcript-acquisition engine wrapping the `yt-dlp` CLI.
//!
//! This crate provides:
//! - Subprocess invocation with timeouts, cancellation, and stderr-based
//!   error classification
//! - Caption availability probing and language prioritization
//! - The acquisition cascade (explicit and auto-detect modes)
//! - WebVTT parsing into normalized plain text
//! - Scoped per-attempt workspaces that clean up on every exit path

pub mod cascade;
pub mod classify;
pub mod error;
pub mod prioritize;
pub mod vtt;
pub mod workspace;
pub mod ytdlp;

pub use cascade::{
    TranscriptEngine, AUTO_SENTINEL, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_METADATA_TIMEOUT,
    MAX_RANKED_ATTEMPTS,
};
pub use classify::classify_tool_error;
pub use error::{EngineError, EngineResult};
pub use prioritize::{base_code, prioritize};
pub use vtt::parse_vtt;
pub use workspace::AttemptWorkspace;
pub use ytdlp::{CaptionSource, YtDlpSource};
