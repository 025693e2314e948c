use std::path::PathBuf;

use super::music::MusicList;
use super::task::TaskItem;
use crate::io::state::SessionState;

/// A fully loaded listkit workspace: both storage slots plus session state.
///
/// This is the one state container for a command invocation. Handlers load
/// it, run reducer operations against it, and save the touched slots — no
/// ambient globals anywhere.
#[derive(Debug)]
pub struct Workspace {
    /// Data directory holding `tasks.json`, `music_lists.json`, `.state.json`
    pub data_dir: PathBuf,
    /// The task store (`tasks.json`), newest first
    pub tasks: Vec<TaskItem>,
    /// The music store (`music_lists.json`); always at least one list
    pub lists: Vec<MusicList>,
    /// Session state (`.state.json`): which list is selected
    pub state: SessionState,
}

impl Workspace {
    /// The currently selected music list.
    ///
    /// Selection is validated at load time, but a delete in the same command
    /// can orphan it; fall back to the first list then (the store invariant
    /// guarantees one exists).
    pub fn current_list(&self) -> &MusicList {
        self.lists
            .iter()
            .find(|l| l.id == self.state.current_list)
            .unwrap_or(&self.lists[0])
    }

    pub fn current_list_mut(&mut self) -> &mut MusicList {
        let idx = self
            .lists
            .iter()
            .position(|l| l.id == self.state.current_list)
            .unwrap_or(0);
        &mut self.lists[idx]
    }

    /// Re-point selection at the first list if the selected one is gone.
    pub fn fix_selection(&mut self) {
        if !self.lists.iter().any(|l| l.id == self.state.current_list) {
            self.state.current_list = self.lists[0].id.clone();
        }
    }
}
