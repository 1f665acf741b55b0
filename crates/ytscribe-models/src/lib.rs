//! Shared data models for the ytscribe backend.
//!
//! This crate provides Serde-serializable types for:
//! - YouTube URL resolution and video identifiers
//! - Caption availability snapshots
//! - Language candidates produced by the prioritizer
//! - The final transcript result and enrichment metadata

pub mod transcript;
pub mod video;

pub use transcript::{
    CaptionAvailability, LanguageCandidate, SubtitleType, TranscriptResult, VideoMetadata,
};
pub use video::{resolve_video_id, VideoId, VideoIdError, VideoIdResult};
