//! Application state.

use std::sync::Arc;

use ytscribe_engine::{TranscriptEngine, YtDlpSource};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub engine: Arc<TranscriptEngine<YtDlpSource>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        let engine = TranscriptEngine::with_timeouts(
            YtDlpSource::new(),
            config.acquire_timeout,
            config.metadata_timeout,
        );
        Self {
            config,
            engine: Arc::new(engine),
        }
    }
}
