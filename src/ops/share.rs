use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::music::{MusicItem, MusicList};
use crate::ops::fresh_id;

/// Literal tag that makes share codes self-identifying.
pub const SHARE_PREFIX: &str = "musiclist_";

/// Error type for share/import operations.
///
/// Every malformed input collapses into `InvalidCode`; the user sees one
/// generic failure whether the base64, the JSON, or the URL was at fault.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("invalid share code or URL")]
    InvalidCode,
    #[error("list not found: {0}")]
    UnknownList(String),
}

/// The payload inside a share code: one list's contents plus a share stamp.
/// Only `musics` is required of foreign input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    #[serde(default)]
    pub name: String,
    pub musics: Vec<MusicItem>,
    #[serde(default)]
    pub shared_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Build the share code for a list: `musiclist_` + base64 of the JSON record.
pub fn encode_share(list: &MusicList, shared_at: DateTime<Utc>) -> String {
    let record = ShareRecord {
        name: list.name.clone(),
        musics: list.musics.clone(),
        shared_at: Some(shared_at),
    };
    // The record is plain data; serialization cannot fail
    let json = serde_json::to_string(&record).expect("share record serializes");
    format!("{}{}", SHARE_PREFIX, BASE64.encode(json))
}

/// Parse a tagged share code back into a record.
pub fn decode_share(token: &str) -> Result<ShareRecord, ShareError> {
    let encoded = token
        .trim()
        .strip_prefix(SHARE_PREFIX)
        .ok_or(ShareError::InvalidCode)?;
    let bytes = BASE64.decode(encoded).map_err(|_| ShareError::InvalidCode)?;
    serde_json::from_slice(&bytes).map_err(|_| ShareError::InvalidCode)
}

/// Legacy fallback: a URL of the older sharing mechanism carried the list id
/// in a `list` query parameter. Returns the id if the input looks like such
/// a URL. The id still has to exist locally to be of any use.
pub fn parse_legacy_list_id(input: &str) -> Option<String> {
    let input = input.trim();
    if !input.contains("://") {
        return None;
    }
    let (_, query) = input.split_once('?')?;
    let query = query.split('#').next().unwrap_or("");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("list=") {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// What an import would do: which incoming songs are new and how many were
/// dropped as duplicates of songs already in the target list.
#[derive(Debug)]
pub struct ImportPlan {
    pub fresh: Vec<MusicItem>,
    pub duplicates: usize,
}

impl ImportPlan {
    pub fn has_duplicates(&self) -> bool {
        self.duplicates > 0
    }
}

/// Split incoming songs into new ones and duplicates of the target list.
/// A duplicate matches an existing song on title and artist, case-insensitively.
pub fn plan_import(incoming: Vec<MusicItem>, existing: &[MusicItem]) -> ImportPlan {
    let (dup, fresh): (Vec<_>, Vec<_>) = incoming
        .into_iter()
        .partition(|m| existing.iter().any(|e| e.same_song(m)));
    ImportPlan {
        fresh,
        duplicates: dup.len(),
    }
}

/// Append the planned songs to the end of a list. Imported songs keep their
/// creation timestamps but get fresh ids, so store-wide id uniqueness holds
/// even when a code is imported twice or round-trips back to its origin.
/// Returns how many songs were appended.
pub fn apply_import(list: &mut MusicList, fresh: Vec<MusicItem>, now: DateTime<Utc>) -> usize {
    let count = fresh.len();
    for mut music in fresh {
        music.id = fresh_id(now, |c| list.musics.iter().any(|m| m.id == c));
        list.musics.push(music);
    }
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
