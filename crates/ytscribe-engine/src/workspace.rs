//! Scoped per-attempt filesystem workspaces.
//!
//! Each download attempt gets its own uniquely named temporary directory.
//! Removal is tied to drop, so it happens on every exit path of the attempt,
//! including early-return failures and task cancellation.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;
use ytscribe_models::VideoId;

use crate::error::EngineResult;

/// A short-lived directory holding one attempt's caption files.
#[derive(Debug)]
pub struct AttemptWorkspace {
    dir: TempDir,
}

impl AttemptWorkspace {
    /// Create a workspace unique to (video id, wall-clock tick), so
    /// concurrent requests for the same video never collide.
    pub fn create(video_id: &VideoId) -> EngineResult<Self> {
        let tick = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = tempfile::Builder::new()
            .prefix(&format!("ytscribe-{video_id}-{tick}-"))
            .tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
