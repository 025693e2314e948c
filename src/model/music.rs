use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title/artist length after trimming.
pub const MAX_MUSIC_FIELD: usize = 100;

/// One song in a music list.
///
/// Serde names are camelCase (`coverUrl`, `isFavorite`, `createdAt`) because
/// the same struct is the wire shape of both the storage slot and the share
/// token, and those records predate this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicItem {
    /// Unique within the owning list's store; decimal millis at creation time.
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Optional cover image URL; empty means none.
    #[serde(default)]
    pub cover_url: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl MusicItem {
    pub fn new(
        id: String,
        title: String,
        artist: String,
        cover_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        MusicItem {
            id,
            title,
            artist,
            cover_url,
            is_favorite: false,
            created_at,
        }
    }

    /// Duplicate check used by import merging: title and artist equal after
    /// Unicode lowercasing. Exact match only, no fuzzing.
    pub fn same_song(&self, other: &MusicItem) -> bool {
        self.title.to_lowercase() == other.title.to_lowercase()
            && self.artist.to_lowercase() == other.artist.to_lowercase()
    }
}

/// A named, ordered list of songs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicList {
    pub id: String,
    pub name: String,
    pub musics: Vec<MusicItem>,
    pub created_at: DateTime<Utc>,
    /// Set once the list has been handed out as a share code.
    #[serde(default)]
    pub is_shared: bool,
}

impl MusicList {
    pub fn new(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        MusicList {
            id,
            name,
            musics: Vec::new(),
            created_at,
            is_shared: false,
        }
    }

    /// The list seeded on first run, before the user has created anything.
    pub fn default_list(created_at: DateTime<Utc>) -> Self {
        MusicList::new("default".to_string(), "My Music".to_string(), created_at)
    }
}

/// View filter over one list's songs. Never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicFilter {
    #[default]
    All,
    Favorites,
    Others,
}

impl MusicFilter {
    pub fn matches(self, music: &MusicItem) -> bool {
        match self {
            MusicFilter::All => true,
            MusicFilter::Favorites => music.is_favorite,
            MusicFilter::Others => !music.is_favorite,
        }
    }
}

/// Parse a filter name from the CLI
pub fn parse_music_filter(s: &str) -> Result<MusicFilter, String> {
    match s {
        "all" => Ok(MusicFilter::All),
        "favorites" | "favs" => Ok(MusicFilter::Favorites),
        "others" => Ok(MusicFilter::Others),
        _ => Err(format!(
            "unknown filter '{}' (expected: all, favorites, others)",
            s
        )),
    }
}
