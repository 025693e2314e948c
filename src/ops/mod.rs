pub mod music_ops;
pub mod search;
pub mod share;
pub mod task_ops;

use chrono::{DateTime, Utc};

/// Mint a time-derived identifier: decimal milliseconds since the epoch,
/// bumped past collisions so ids stay unique however fast items are created.
pub fn fresh_id<F>(now: DateTime<Utc>, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}
