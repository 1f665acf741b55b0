//! yt-dlp process boundary.
//!
//! The caption source is an external program, not a library: every operation
//! is one invocation with captured exit status and streams. `CaptionSource`
//! is the seam that lets tests substitute a fake for the real tool.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};
use ytscribe_models::{CaptionAvailability, VideoId, VideoMetadata};

use crate::classify::classify_tool_error;
use crate::error::{EngineError, EngineResult};

/// Default per-invocation deadline.
const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// yt-dlp `--print` template for caption availability: original language,
/// manual subtitle map, auto caption map, as one JSON object on stdout.
const AVAILABILITY_TEMPLATE: &str = "%(.{language,subtitles,automatic_captions})j";

/// yt-dlp `--print` template for enrichment metadata.
const METADATA_TEMPLATE: &str = "%(.{description,view_count,uploader})j";

/// Capability contract for the external caption-extraction tool.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Metadata-only probe: which languages have manual vs. auto captions,
    /// and the video's detected original language.
    async fn fetch_availability(&self, url: &str) -> EngineResult<CaptionAvailability>;

    /// Download caption files for one language into `dest`. Files are named
    /// `<video_id>.<lang>.vtt`, with an `auto` marker segment for
    /// machine-generated tracks.
    async fn download_captions(&self, url: &str, lang: &str, dest: &Path) -> EngineResult<()>;

    /// Auxiliary video metadata, independent of caption logic.
    async fn fetch_metadata(&self, video_id: &VideoId) -> EngineResult<VideoMetadata>;
}

/// Production `CaptionSource` shelling out to yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    tool_timeout: Duration,
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlpSource {
    pub fn new() -> Self {
        Self {
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_timeout(tool_timeout: Duration) -> Self {
        Self { tool_timeout }
    }

    /// Run yt-dlp with `args`, enforcing the per-invocation deadline.
    ///
    /// The child is spawned with `kill_on_drop`, so a fired deadline (or a
    /// cancelled caller) also terminates the subprocess instead of leaving it
    /// running unbounded.
    async fn run(&self, args: &[&str]) -> EngineResult<std::process::Output> {
        which::which("yt-dlp")
            .map_err(|_| EngineError::unknown("yt-dlp not found in PATH"))?;

        debug!(args = ?args, "invoking yt-dlp");

        let child = Command::new("yt-dlp")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(self.tool_timeout, child.wait_with_output()).await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    timeout_secs = self.tool_timeout.as_secs(),
                    "yt-dlp deadline exceeded, killing subprocess"
                );
                return Err(EngineError::Timeout(self.tool_timeout.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(stderr = %stderr, "yt-dlp exited with non-zero status");
            return Err(classify_tool_error(&stderr));
        }

        Ok(output)
    }
}

/// Wire shape of the availability probe. Every field is optional: yt-dlp
/// omits what it does not know, and absence means "none" rather than failure.
#[derive(Debug, Deserialize)]
struct RawAvailability {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    subtitles: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    automatic_captions: Option<HashMap<String, serde_json::Value>>,
}

impl From<RawAvailability> for CaptionAvailability {
    fn from(raw: RawAvailability) -> Self {
        CaptionAvailability {
            original_language: raw.language,
            manual: raw.subtitles.unwrap_or_default().into_keys().collect(),
            auto: raw
                .automatic_captions
                .unwrap_or_default()
                .into_keys()
                .collect(),
        }
    }
}

/// Wire shape of the metadata probe.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    uploader: Option<String>,
}

#[async_trait]
impl CaptionSource for YtDlpSource {
    async fn fetch_availability(&self, url: &str) -> EngineResult<CaptionAvailability> {
        let output = self
            .run(&[
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                "--print",
                AVAILABILITY_TEMPLATE,
                url,
            ])
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let raw: RawAvailability = serde_json::from_str(stdout.trim())?;
        Ok(raw.into())
    }

    async fn download_captions(&self, url: &str, lang: &str, dest: &Path) -> EngineResult<()> {
        let lang_spec = format!("{lang},-live_chat");
        let output_template = format!("{}/%(id)s.%(ext)s", dest.display());

        self.run(&[
            "--skip-download",
            "--no-playlist",
            "--no-warnings",
            "--write-subs",
            "--write-auto-subs",
            "--sub-langs",
            &lang_spec,
            "--sub-format",
            "vtt",
            "-o",
            &output_template,
            url,
        ])
        .await?;

        Ok(())
    }

    async fn fetch_metadata(&self, video_id: &VideoId) -> EngineResult<VideoMetadata> {
        let url = video_id.watch_url();
        let output = self
            .run(&[
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                "--print",
                METADATA_TEMPLATE,
                &url,
            ])
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let raw: RawMetadata = serde_json::from_str(stdout.trim())?;
        Ok(VideoMetadata {
            description: raw.description,
            view_count: raw.view_count,
            author: raw.uploader,
        })
    }
}
