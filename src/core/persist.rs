//! Meter state persistence
//!
//! One JSON file per meter, written wholesale. A missing file on load means
//! "start fresh"; malformed JSON is an error.

use std::io::ErrorKind;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::types::{MeterError, ReleaseEvent, Result};

/// On-disk shape of a meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterSnapshot {
    pub current_level: f64,
    /// Unix epoch seconds
    pub last_update: f64,
    #[serde(default)]
    pub release_history: Vec<ReleaseEvent>,
}

/// Save snapshot to a JSON file, creating parent directories
pub fn save_state(snapshot: &MeterSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let json = serde_json::to_string_pretty(snapshot).map_err(MeterError::Serialize)?;

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| MeterError::io(dir, e))?;
        }
    }

    std::fs::write(path, json).map_err(|e| MeterError::io(path, e))?;

    info!(
        path = %path.display(),
        current_level = snapshot.current_level,
        releases = snapshot.release_history.len(),
        "saved meter state"
    );
    Ok(())
}

/// Load snapshot from a JSON file. `Ok(None)` if the file does not exist.
pub fn load_state(path: impl AsRef<Path>) -> Result<Option<MeterSnapshot>> {
    let path = path.as_ref();

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no saved meter state, starting fresh");
            return Ok(None);
        }
        Err(e) => return Err(MeterError::io(path, e)),
    };

    let snapshot: MeterSnapshot = serde_json::from_str(&json).map_err(MeterError::Parse)?;

    info!(
        path = %path.display(),
        current_level = snapshot.current_level,
        releases = snapshot.release_history.len(),
        "loaded meter state"
    );
    Ok(Some(snapshot))
}

// =============================================================================
// TESTS
// =============================================================================
