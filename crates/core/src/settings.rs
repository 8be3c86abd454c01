//! Upload tuning knobs. Every field has a default so a partial JSON file is fine.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Wait attached to an action when the builder doesn't pick one.
    pub base_wait_ms: u64,
    /// Polling attempts while waiting for a query response.
    pub query_attempts: u32,
    /// Wait per polling attempt.
    pub query_interval_ms: u64,
    /// Run the preflight query before composing an upload.
    pub preflight: bool,
    pub start_marker: String,
    pub end_marker: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            base_wait_ms: 200,
            query_attempts: 20,
            query_interval_ms: 50,
            preflight: false,
            start_marker: "upload".to_string(),
            end_marker: "end".to_string(),
        }
    }
}

impl UploadSettings {
    #[inline]
    pub fn query_interval(&self) -> Duration {
        Duration::from_millis(self.query_interval_ms)
    }

    /// Total time a query may wait before it is declared lost. Saturates at `Duration::MAX`.
    #[inline]
    pub fn query_budget(&self) -> Duration {
        self.query_interval()
            .checked_mul(self.query_attempts)
            .unwrap_or(Duration::MAX)
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("parse upload settings: {e}"))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::from_json(&text)
    }
}
