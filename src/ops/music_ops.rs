use chrono::{DateTime, Utc};

use crate::model::music::{MusicFilter, MusicItem, MusicList, MAX_MUSIC_FIELD};
use crate::ops::fresh_id;

/// Error type for music and list operations
#[derive(Debug, thiserror::Error)]
pub enum MusicError {
    #[error("song not found: {0}")]
    NotFound(String),
    #[error("list not found: {0}")]
    ListNotFound(String),
    #[error("song title is empty")]
    EmptyTitle,
    #[error("artist is empty")]
    EmptyArtist,
    #[error("{field} too long ({len} chars, max {MAX_MUSIC_FIELD})")]
    FieldTooLong { field: &'static str, len: usize },
    #[error("list name is empty")]
    EmptyListName,
    #[error("cannot delete the last remaining list")]
    LastList,
}

// ---------------------------------------------------------------------------
// Song CRUD
// ---------------------------------------------------------------------------

/// Add a song to the front of a list (newest first).
/// Title and artist are trimmed and required; cover is trimmed and optional.
/// Returns the assigned id.
pub fn add_music(
    list: &mut MusicList,
    title: &str,
    artist: &str,
    cover_url: &str,
    now: DateTime<Utc>,
) -> Result<String, MusicError> {
    let (title, artist, cover_url) = validate_fields(title, artist, cover_url)?;
    let id = fresh_id(now, |c| list.musics.iter().any(|m| m.id == c));
    list.musics
        .insert(0, MusicItem::new(id.clone(), title, artist, cover_url, now));
    Ok(id)
}

/// Flip the favorite flag on the matching song.
pub fn toggle_favorite(list: &mut MusicList, id: &str) -> Result<(), MusicError> {
    let music = find_music_mut(list, id)?;
    music.is_favorite = !music.is_favorite;
    Ok(())
}

/// Replace title, artist, and cover on the matching song.
/// All three are set at once; callers keeping a field pass its current value.
pub fn edit_music(
    list: &mut MusicList,
    id: &str,
    title: &str,
    artist: &str,
    cover_url: &str,
) -> Result<(), MusicError> {
    let (title, artist, cover_url) = validate_fields(title, artist, cover_url)?;
    let music = find_music_mut(list, id)?;
    music.title = title;
    music.artist = artist;
    music.cover_url = cover_url;
    Ok(())
}

/// Remove the matching song.
pub fn delete_music(list: &mut MusicList, id: &str) -> Result<(), MusicError> {
    let idx = list
        .musics
        .iter()
        .position(|m| m.id == id)
        .ok_or_else(|| MusicError::NotFound(id.to_string()))?;
    list.musics.remove(idx);
    Ok(())
}

/// Drop every non-favorite song, keeping order of the rest.
/// Returns how many were removed. Idempotent.
pub fn clear_non_favorites(list: &mut MusicList) -> usize {
    let before = list.musics.len();
    list.musics.retain(|m| m.is_favorite);
    before - list.musics.len()
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Derive the read-only view for a filter, preserving list order.
pub fn filter_musics(musics: &[MusicItem], filter: MusicFilter) -> Vec<&MusicItem> {
    musics.iter().filter(|m| filter.matches(m)).collect()
}

// ---------------------------------------------------------------------------
// List management
// ---------------------------------------------------------------------------

/// Create a new list at the end of the store. Rejects a blank name.
/// Returns the assigned id; callers select the new list.
pub fn create_list(
    lists: &mut Vec<MusicList>,
    name: &str,
    now: DateTime<Utc>,
) -> Result<String, MusicError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MusicError::EmptyListName);
    }
    let id = fresh_id(now, |c| lists.iter().any(|l| l.id == c));
    lists.push(MusicList::new(id.clone(), name.to_string(), now));
    Ok(id)
}

/// Delete a list. The store must keep at least one list, so deleting the
/// sole remaining list is rejected.
pub fn delete_list(lists: &mut Vec<MusicList>, id: &str) -> Result<(), MusicError> {
    if lists.len() <= 1 {
        return Err(MusicError::LastList);
    }
    let idx = lists
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| MusicError::ListNotFound(id.to_string()))?;
    lists.remove(idx);
    Ok(())
}

pub fn find_list<'a>(lists: &'a [MusicList], id: &str) -> Option<&'a MusicList> {
    lists.iter().find(|l| l.id == id)
}

pub fn find_list_mut<'a>(lists: &'a mut [MusicList], id: &str) -> Option<&'a mut MusicList> {
    lists.iter_mut().find(|l| l.id == id)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_fields(
    title: &str,
    artist: &str,
    cover_url: &str,
) -> Result<(String, String, String), MusicError> {
    let title = title.trim();
    let artist = artist.trim();
    let cover_url = cover_url.trim();
    if title.is_empty() {
        return Err(MusicError::EmptyTitle);
    }
    if artist.is_empty() {
        return Err(MusicError::EmptyArtist);
    }
    if title.chars().count() > MAX_MUSIC_FIELD {
        return Err(MusicError::FieldTooLong {
            field: "title",
            len: title.chars().count(),
        });
    }
    if artist.chars().count() > MAX_MUSIC_FIELD {
        return Err(MusicError::FieldTooLong {
            field: "artist",
            len: artist.chars().count(),
        });
    }
    Ok((title.to_string(), artist.to_string(), cover_url.to_string()))
}

fn find_music_mut<'a>(list: &'a mut MusicList, id: &str) -> Result<&'a mut MusicItem, MusicError> {
    list.musics
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| MusicError::NotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
