//! Request handlers.

use std::collections::BTreeSet;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ytscribe_models::{resolve_video_id, SubtitleType};

use crate::error::ApiResult;
use crate::state::AppState;

/// Query parameters for the transcript endpoint.
#[derive(Debug, Deserialize)]
pub struct TranscriptParams {
    pub url: String,
    /// Explicit language tag or `"auto"`; absent means auto-detect.
    pub language: Option<String>,
}

/// Successful transcript response.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub transcript: String,
    pub metadata: TranscriptMetadata,
}

/// Response metadata block. Field casing follows the public API contract.
#[derive(Debug, Serialize)]
pub struct TranscriptMetadata {
    #[serde(rename = "videoId")]
    pub video_id: String,
    #[serde(rename = "subtitleType")]
    pub subtitle_type: SubtitleType,
    pub language: String,
    #[serde(rename = "wasAutoDetected")]
    pub was_auto_detected: bool,
    #[serde(rename = "availableLanguages", skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<BTreeSet<String>>,
    pub description: Option<String>,
    pub view_count: Option<u64>,
    pub author: Option<String>,
}

/// Fetch a transcript plus enrichment metadata for a video URL.
pub async fn get_transcript(
    State(state): State<AppState>,
    Query(params): Query<TranscriptParams>,
) -> ApiResult<Json<TranscriptResponse>> {
    let video_id = resolve_video_id(&params.url)
        .map_err(ytscribe_engine::EngineError::from)?;

    info!(%video_id, language = params.language.as_deref().unwrap_or("auto"), "transcript requested");

    // Caption acquisition and metadata enrichment are independent tool
    // invocations; run them concurrently under their own deadlines.
    let (transcript, metadata) = tokio::join!(
        state
            .engine
            .fetch_transcript(&params.url, params.language.as_deref()),
        state.engine.fetch_video_metadata(&video_id),
    );
    let transcript = transcript?;
    let metadata = metadata?;

    Ok(Json(TranscriptResponse {
        success: true,
        transcript: transcript.text,
        metadata: TranscriptMetadata {
            video_id: transcript.video_id.as_str().to_string(),
            subtitle_type: transcript.subtitle_type,
            language: transcript.language,
            was_auto_detected: transcript.was_auto_detected,
            available_languages: transcript.available_languages,
            description: metadata.description,
            view_count: metadata.view_count,
            author: metadata.author,
        },
    }))
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
