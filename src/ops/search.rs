use regex::Regex;

use crate::model::music::MusicItem;
use crate::model::task::TaskItem;

/// Which field of a song matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Artist,
}

/// A search hit within the selected music list
#[derive(Debug, Clone)]
pub struct MusicHit<'a> {
    pub music: &'a MusicItem,
    pub field: MatchField,
}

/// Search task texts, preserving store order. Read-only.
pub fn search_tasks<'a>(tasks: &'a [TaskItem], re: &Regex) -> Vec<&'a TaskItem> {
    tasks.iter().filter(|t| re.is_match(&t.text)).collect()
}

/// Search song titles and artists, preserving list order. A song matching on
/// both fields is reported once, as a title hit.
pub fn search_musics<'a>(musics: &'a [MusicItem], re: &Regex) -> Vec<MusicHit<'a>> {
    let mut hits = Vec::new();
    for music in musics {
        if re.is_match(&music.title) {
            hits.push(MusicHit {
                music,
                field: MatchField::Title,
            });
        } else if re.is_match(&music.artist) {
            hits.push(MusicHit {
                music,
                field: MatchField::Artist,
            });
        }
    }
    hits
}
