use serde::Serialize;

use crate::model::music::{MusicItem, MusicList};
use crate::model::task::TaskItem;
use crate::ops::search::{MatchField, MusicHit};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub filter: &'a str,
    pub count: usize,
    pub tasks: Vec<&'a TaskItem>,
}

#[derive(Serialize)]
pub struct MusicViewJson<'a> {
    pub list: &'a str,
    pub name: &'a str,
    pub filter: &'a str,
    pub count: usize,
    pub musics: Vec<&'a MusicItem>,
}

#[derive(Serialize)]
pub struct ListInfoJson<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub selected: bool,
    pub songs: usize,
    pub favorites: usize,
    pub shared: bool,
}

#[derive(Serialize)]
pub struct ShareJson<'a> {
    pub list: &'a str,
    pub songs: usize,
    pub code: &'a str,
}

#[derive(Serialize)]
pub struct ImportJson<'a> {
    pub list: &'a str,
    pub from: &'a str,
    pub imported: usize,
    pub duplicates_dropped: usize,
}

#[derive(Serialize)]
pub struct ClearedJson {
    pub removed: usize,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One task per line: `[x] 1700000000000 buy milk`
pub fn format_task_line(task: &TaskItem) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    format!("[{}] {} {}", check, task.id, task.text)
}

/// One song per line: `[♥] 1700000000000 Imagine — John Lennon`
pub fn format_music_line(music: &MusicItem) -> String {
    let heart = if music.is_favorite { '♥' } else { '♡' };
    format!("[{}] {} {} — {}", heart, music.id, music.title, music.artist)
}

/// One list per line in `lk list show`; the selected list gets a `*`.
pub fn format_list_line(list: &MusicList, selected: bool) -> String {
    let marker = if selected { '*' } else { ' ' };
    let favorites = list.musics.iter().filter(|m| m.is_favorite).count();
    let shared = if list.is_shared { ", shared" } else { "" };
    format!(
        "{} {} {} ({} songs, {} favorites{})",
        marker,
        list.id,
        list.name,
        list.musics.len(),
        favorites,
        shared
    )
}

/// One search hit per line, with the matched field tagged.
pub fn format_music_hit(hit: &MusicHit) -> String {
    let field = match hit.field {
        MatchField::Title => "title",
        MatchField::Artist => "artist",
    };
    format!("{} ({})", format_music_line(hit.music), field)
}
