use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted session state (written to .state.json in the data directory).
///
/// Only remembers which music list is selected between invocations. Losing
/// this file is harmless; selection falls back to the first list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    /// Selected music list id
    #[serde(default)]
    pub current_list: String,
}

/// Read .state.json from the data directory. Missing or unreadable state
/// is just a fresh default.
pub fn read_session_state(data_dir: &Path) -> SessionState {
    let path = data_dir.join(".state.json");
    let Ok(content) = fs::read_to_string(&path) else {
        return SessionState::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Write .state.json to the data directory
pub fn write_session_state(data_dir: &Path, state: &SessionState) -> Result<(), std::io::Error> {
    let path = data_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
