//! Caption availability, language candidates, and transcript results.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::video::VideoId;

/// Whether a caption track was manually authored or machine-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleType {
    Manual,
    Auto,
}

impl SubtitleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleType::Manual => "manual",
            SubtitleType::Auto => "auto",
        }
    }
}

impl fmt::Display for SubtitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the caption tracks the source offers for one video.
///
/// Built fresh per request; immutable once fetched. The `BTreeSet`s keep the
/// language keys in their natural sorted order, which the prioritizer relies
/// on for deterministic ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionAvailability {
    /// The video's detected original spoken language, when the source knows it.
    pub original_language: Option<String>,
    /// Languages with manually authored captions.
    pub manual: BTreeSet<String>,
    /// Languages with machine-generated captions.
    pub auto: BTreeSet<String>,
}

impl CaptionAvailability {
    /// True when the source offers no caption track at all.
    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.auto.is_empty()
    }

    /// Union of manual and auto language keys, for the caller-facing
    /// `available_languages` field.
    pub fn all_languages(&self) -> BTreeSet<String> {
        self.manual.union(&self.auto).cloned().collect()
    }
}

/// One (language, track kind) pair the cascade may attempt.
///
/// Uniquely identified by the pair; the prioritizer never emits duplicates
/// and its output order is the priority order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCandidate {
    pub tag: String,
    pub is_manual: bool,
}

impl LanguageCandidate {
    pub fn manual(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            is_manual: true,
        }
    }

    pub fn auto(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            is_manual: false,
        }
    }
}

/// The engine's final output for one acquisition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Normalized plain-text transcript.
    pub text: String,
    pub video_id: VideoId,
    pub subtitle_type: SubtitleType,
    /// The language tag the captions were downloaded under.
    pub language: String,
    /// True when the language was chosen by the cascade rather than the caller.
    pub was_auto_detected: bool,
    /// All language keys the source reported, auto-detect mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<BTreeSet<String>>,
}

/// Auxiliary video metadata fetched independently of the caption logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub description: Option<String>,
    pub view_count: Option<u64>,
    pub author: Option<String>,
}
