use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::io::state::read_session_state;
use crate::model::music::MusicList;
use crate::model::task::TaskItem;
use crate::model::workspace::Workspace;

/// Storage slot for the task store: a JSON array of task items.
pub const TASKS_FILE: &str = "tasks.json";
/// Storage slot for the music store: a JSON array of lists.
pub const LISTS_FILE: &str = "music_lists.json";

/// Error type for store I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not encode store: {0}")]
    EncodeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load both stores and the session state from a data directory, creating
/// the directory on first run.
///
/// A slot that exists but fails to parse is moved aside to `<name>.bak` and
/// replaced with its default; startup never fails on corrupt data. The music
/// store is re-seeded with the default list whenever it comes back empty, and
/// the list selection is validated against what actually loaded.
pub fn load_workspace(data_dir: &Path) -> Result<Workspace, StoreError> {
    fs::create_dir_all(data_dir).map_err(|e| StoreError::WriteError {
        path: data_dir.to_path_buf(),
        source: e,
    })?;

    let tasks: Vec<TaskItem> = load_slot(&data_dir.join(TASKS_FILE))?.unwrap_or_default();

    let mut lists: Vec<MusicList> = load_slot(&data_dir.join(LISTS_FILE))?.unwrap_or_default();
    if lists.is_empty() {
        lists.push(MusicList::default_list(Utc::now()));
    }

    let mut state = read_session_state(data_dir);
    if !lists.iter().any(|l| l.id == state.current_list) {
        state.current_list = lists[0].id.clone();
    }

    Ok(Workspace {
        data_dir: data_dir.to_path_buf(),
        tasks,
        lists,
        state,
    })
}

/// Read and parse one storage slot. Returns `None` for a missing slot.
/// A corrupt slot is backed up as `<name>.bak` and reported as missing.
fn load_slot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    // Parsed from raw bytes so non-UTF-8 garbage recovers like bad JSON
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let backup = path.with_extension("json.bak");
            eprintln!(
                "warning: {} is corrupt ({}); backing up to {} and starting fresh",
                path.display(),
                e,
                backup.display()
            );
            fs::rename(path, &backup).map_err(|e| StoreError::WriteError {
                path: backup,
                source: e,
            })?;
            Ok(None)
        }
    }
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

/// Write the task store slot.
pub fn save_tasks(ws: &Workspace) -> Result<(), StoreError> {
    save_slot(&ws.data_dir.join(TASKS_FILE), &ws.tasks)
}

/// Write the music store slot.
pub fn save_lists(ws: &Workspace) -> Result<(), StoreError> {
    save_slot(&ws.data_dir.join(LISTS_FILE), &ws.lists)
}

fn save_slot<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write via a temp file in the same directory, then rename into place,
/// so a crash mid-write cannot corrupt a slot.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
