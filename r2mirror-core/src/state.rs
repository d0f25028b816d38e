//! Persisted retention state between runs.
//!
//! The state file holds the retention window of the last completed run so
//! the next run can tell whether the window shrank.

use crate::error::{MirrorError, MirrorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Retention window recorded by the last completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionState {
    #[serde(rename = "dias_ultimos", default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
}

impl RetentionState {
    pub fn new(retention_days: u32) -> Self {
        Self {
            retention_days: Some(retention_days),
        }
    }

    /// Loads the state file. A missing file means "no prior run".
    ///
    /// An unreadable or malformed file is an error: ignoring it would hide a
    /// window shrink and skip the purge.
    pub fn load(path: impl AsRef<Path>) -> MirrorResult<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no state file at {}, treating as first run", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(MirrorError::io(path, e)),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overwrites (or creates) the state file.
    pub fn save(&self, path: impl AsRef<Path>) -> MirrorResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(|e| MirrorError::io(path, e))?;
        debug!("saved retention state to {}", path.display());
        Ok(())
    }

    /// Window to compare against. With no recorded run, the current window
    /// is its own baseline.
    pub fn baseline(&self, current_days: u32) -> u32 {
        self.retention_days.unwrap_or(current_days)
    }
}
