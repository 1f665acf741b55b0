//! Acquisition cascade: attempts, fallback policy, and the engine facade.
//!
//! One acquisition request is either a single attempt for an explicitly
//! requested language, or an auto-detect run over the prioritized candidate
//! list. The attempt budget is fixed: at most `MAX_RANKED_ATTEMPTS` ranked
//! candidates plus one original-language fallback, and only rate-limit
//! failures move the cascade to the next candidate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};
use ytscribe_models::{
    resolve_video_id, SubtitleType, TranscriptResult, VideoId, VideoMetadata,
};

use crate::error::{EngineError, EngineResult};
use crate::prioritize::{base_code, prioritize};
use crate::vtt::parse_vtt;
use crate::workspace::AttemptWorkspace;
use crate::ytdlp::CaptionSource;

/// Ranked candidates attempted before the original-language fallback.
pub const MAX_RANKED_ATTEMPTS: usize = 2;

/// Language value meaning "let the engine pick".
pub const AUTO_SENTINEL: &str = "auto";

/// Default overall deadline for one acquisition request.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deadline for a metadata-enrichment fetch.
pub const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(15);

/// Transcript-acquisition engine over a caption source.
#[derive(Debug, Clone)]
pub struct TranscriptEngine<S> {
    source: S,
    acquire_timeout: Duration,
    metadata_timeout: Duration,
}

/// How an attempt locates its caption file in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileMatch<'a> {
    /// The file's language segment must equal the requested tag.
    Language(&'a str),
    /// Any language counts; manual files win over auto files.
    AnyLanguage,
}

/// A caption file found in the workspace, already parsed.
#[derive(Debug)]
struct AcquiredCaptions {
    text: String,
    language: String,
    subtitle_type: SubtitleType,
}

impl<S: CaptionSource> TranscriptEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
        }
    }

    pub fn with_timeouts(
        source: S,
        acquire_timeout: Duration,
        metadata_timeout: Duration,
    ) -> Self {
        Self {
            source,
            acquire_timeout,
            metadata_timeout,
        }
    }

    /// Resolve a URL and acquire its transcript under the overall deadline.
    ///
    /// `language` is an explicit tag, the `"auto"` sentinel, or absent
    /// (equivalent to auto). Deadline expiry yields `Timeout`; dropping the
    /// in-flight future kills the subprocess and removes the workspace.
    pub async fn fetch_transcript(
        &self,
        url: &str,
        language: Option<&str>,
    ) -> EngineResult<TranscriptResult> {
        let video_id = resolve_video_id(url)?;

        match tokio::time::timeout(self.acquire_timeout, self.acquire(url, &video_id, language))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(%video_id, "acquisition deadline exceeded");
                Err(EngineError::Timeout(self.acquire_timeout.as_secs()))
            }
        }
    }

    /// Fetch enrichment metadata under its own deadline.
    pub async fn fetch_video_metadata(&self, video_id: &VideoId) -> EngineResult<VideoMetadata> {
        match tokio::time::timeout(self.metadata_timeout, self.source.fetch_metadata(video_id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(self.metadata_timeout.as_secs())),
        }
    }

    /// Acquire a transcript for an already-resolved video.
    pub async fn acquire(
        &self,
        url: &str,
        video_id: &VideoId,
        language: Option<&str>,
    ) -> EngineResult<TranscriptResult> {
        match language {
            Some(lang) if lang != AUTO_SENTINEL => {
                // Explicit mode: exactly one attempt, failures propagate
                // unchanged, never substitute another language.
                let captions = self
                    .attempt(url, video_id, lang, FileMatch::Language(lang))
                    .await?;
                Ok(TranscriptResult {
                    text: captions.text,
                    video_id: video_id.clone(),
                    subtitle_type: captions.subtitle_type,
                    language: captions.language,
                    was_auto_detected: false,
                    available_languages: None,
                })
            }
            _ => self.acquire_auto(url, video_id).await,
        }
    }

    /// Auto-detect mode: metadata, prioritization, capped attempts, fallback.
    async fn acquire_auto(&self, url: &str, video_id: &VideoId) -> EngineResult<TranscriptResult> {
        let availability = self.source.fetch_availability(url).await?;
        let candidates = prioritize(&availability);

        if candidates.is_empty() {
            return Err(EngineError::no_subtitles(format!(
                "no caption tracks available for {video_id}"
            )));
        }

        let available_languages = availability.all_languages();
        let mut remembered_rate_limit: Option<EngineError> = None;

        for candidate in candidates.iter().take(MAX_RANKED_ATTEMPTS) {
            debug!(%video_id, tag = %candidate.tag, is_manual = candidate.is_manual, "attempting candidate");
            match self
                .attempt(url, video_id, &candidate.tag, FileMatch::Language(&candidate.tag))
                .await
            {
                Ok(captions) => {
                    return Ok(TranscriptResult {
                        text: captions.text,
                        video_id: video_id.clone(),
                        subtitle_type: captions.subtitle_type,
                        language: captions.language,
                        was_auto_detected: true,
                        available_languages: Some(available_languages),
                    });
                }
                Err(e) if e.is_rate_limited() => {
                    warn!(%video_id, tag = %candidate.tag, "candidate rate limited, trying next");
                    remembered_rate_limit = Some(e);
                }
                // Everything else is non-transient and aborts the cascade.
                Err(e) => return Err(e),
            }
        }

        // Final attempt: the auto track under the original language's base
        // code, which avoids the source's translation pipeline entirely.
        let Some(original) = availability.original_language.as_deref() else {
            return Err(remembered_rate_limit.unwrap_or_else(|| {
                EngineError::no_subtitles(format!("no usable caption track for {video_id}"))
            }));
        };
        let fallback_lang = base_code(original);
        info!(%video_id, lang = %fallback_lang, "falling back to original-language auto track");

        match self
            .attempt(url, video_id, fallback_lang, FileMatch::AnyLanguage)
            .await
        {
            Ok(captions) => Ok(TranscriptResult {
                text: captions.text,
                video_id: video_id.clone(),
                subtitle_type: captions.subtitle_type,
                language: captions.language,
                was_auto_detected: true,
                available_languages: Some(available_languages),
            }),
            // A rate limit from the fallback itself wins; otherwise the first
            // rate limit seen wins over whatever the fallback failed with.
            Err(e) if e.is_rate_limited() => Err(e),
            Err(e) => Err(remembered_rate_limit.unwrap_or(e)),
        }
    }

    /// One download attempt inside a scoped workspace.
    ///
    /// The workspace is removed when this function returns, on every path.
    async fn attempt(
        &self,
        url: &str,
        video_id: &VideoId,
        lang: &str,
        file_match: FileMatch<'_>,
    ) -> EngineResult<AcquiredCaptions> {
        let workspace = AttemptWorkspace::create(video_id)?;

        self.source
            .download_captions(url, lang, workspace.path())
            .await?;

        let Some(located) = locate_caption_file(workspace.path(), video_id, file_match)? else {
            return Err(EngineError::no_subtitles(format!(
                "no caption file produced for {video_id} in '{lang}'"
            )));
        };

        let raw = tokio::fs::read_to_string(&located.path).await?;
        let text = parse_vtt(&raw);
        if text.trim().is_empty() {
            return Err(EngineError::no_subtitles(format!(
                "caption track for {video_id} in '{}' is empty",
                located.language
            )));
        }

        Ok(AcquiredCaptions {
            text,
            language: located.language,
            subtitle_type: located.subtitle_type,
        })
    }
}

/// A caption file the locator matched in the workspace.
#[derive(Debug)]
struct LocatedFile {
    path: PathBuf,
    language: String,
    subtitle_type: SubtitleType,
}

/// Find the caption file for this attempt.
///
/// Files are named `<video_id>.<lang>[.auto].vtt`. Manual files (no `auto`
/// marker segment) are preferred; ties break on language order so the scan
/// is deterministic regardless of directory iteration order.
fn locate_caption_file(
    dir: &Path,
    video_id: &VideoId,
    file_match: FileMatch<'_>,
) -> EngineResult<Option<LocatedFile>> {
    let prefix = format!("{video_id}.");
    let mut manual: Vec<LocatedFile> = Vec::new();
    let mut auto: Vec<LocatedFile> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();

        let Some(stem) = name.strip_suffix(".vtt") else {
            continue;
        };
        let Some(middle) = stem.strip_prefix(&prefix) else {
            continue;
        };

        let mut segments = middle.split('.');
        let language = segments.next().unwrap_or_default().to_string();
        if language.is_empty() {
            continue;
        }
        let is_auto = segments.any(|s| s == "auto");

        if let FileMatch::Language(wanted) = file_match {
            if language != wanted {
                continue;
            }
        }

        let located = LocatedFile {
            path: entry.path(),
            language,
            subtitle_type: if is_auto {
                SubtitleType::Auto
            } else {
                SubtitleType::Manual
            },
        };
        if is_auto {
            auto.push(located);
        } else {
            manual.push(located);
        }
    }

    manual.sort_by(|a, b| a.language.cmp(&b.language));
    auto.sort_by(|a, b| a.language.cmp(&b.language));

    Ok(manual.into_iter().next().or_else(|| auto.into_iter().next()))
}
