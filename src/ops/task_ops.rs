use chrono::{DateTime, Utc};

use crate::model::task::{TaskFilter, TaskItem, MAX_TASK_TEXT};
use crate::ops::fresh_id;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task text is empty")]
    EmptyText,
    #[error("task text too long ({0} chars, max {MAX_TASK_TEXT})")]
    TextTooLong(usize),
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Add a task to the front of the store (newest first).
/// Trims the text, rejects blank or overlong input. Returns the assigned id.
pub fn add_task(
    tasks: &mut Vec<TaskItem>,
    text: &str,
    now: DateTime<Utc>,
) -> Result<String, TaskError> {
    let text = validate_text(text)?;
    let id = fresh_id(now, |c| tasks.iter().any(|t| t.id == c));
    tasks.insert(0, TaskItem::new(id.clone(), text, now));
    Ok(id)
}

/// Flip the completed flag on the matching task.
pub fn toggle_task(tasks: &mut [TaskItem], id: &str) -> Result<(), TaskError> {
    let task = find_task_mut(tasks, id)?;
    task.completed = !task.completed;
    Ok(())
}

/// Replace the text of the matching task (trimmed, validated).
pub fn edit_task(tasks: &mut [TaskItem], id: &str, text: &str) -> Result<(), TaskError> {
    let text = validate_text(text)?;
    let task = find_task_mut(tasks, id)?;
    task.text = text;
    Ok(())
}

/// Remove the matching task.
pub fn delete_task(tasks: &mut Vec<TaskItem>, id: &str) -> Result<(), TaskError> {
    let idx = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    tasks.remove(idx);
    Ok(())
}

/// Drop every completed task, keeping order of the rest.
/// Returns how many were removed. Idempotent.
pub fn clear_completed(tasks: &mut Vec<TaskItem>) -> usize {
    let before = tasks.len();
    tasks.retain(|t| !t.completed);
    before - tasks.len()
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Derive the read-only view for a filter, preserving store order.
pub fn filter_tasks(tasks: &[TaskItem], filter: TaskFilter) -> Vec<&TaskItem> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_text(text: &str) -> Result<String, TaskError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TaskError::EmptyText);
    }
    if text.chars().count() > MAX_TASK_TEXT {
        return Err(TaskError::TextTooLong(text.chars().count()));
    }
    Ok(text.to_string())
}

fn find_task_mut<'a>(tasks: &'a mut [TaskItem], id: &str) -> Result<&'a mut TaskItem, TaskError> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn sample_tasks() -> Vec<TaskItem> {
        let mut tasks = Vec::new();
        add_task(&mut tasks, "buy milk", at(1_000)).unwrap();
        add_task(&mut tasks, "walk the dog", at(2_000)).unwrap();
        add_task(&mut tasks, "file taxes", at(3_000)).unwrap();
        tasks
    }

    // --- add ---

    #[test]
    fn test_add_prepends() {
        let mut tasks = sample_tasks();
        add_task(&mut tasks, "newest", at(4_000)).unwrap();
        assert_eq!(tasks[0].text, "newest");
        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn test_add_trims_text() {
        let mut tasks = Vec::new();
        add_task(&mut tasks, "  padded  ", at(1_000)).unwrap();
        assert_eq!(tasks[0].text, "padded");
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut tasks = Vec::new();
        assert!(matches!(
            add_task(&mut tasks, "   ", at(1_000)),
            Err(TaskError::EmptyText)
        ));
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_add_rejects_overlong() {
        let mut tasks = Vec::new();
        let long = "x".repeat(MAX_TASK_TEXT + 1);
        assert!(matches!(
            add_task(&mut tasks, &long, at(1_000)),
            Err(TaskError::TextTooLong(_))
        ));
    }

    #[test]
    fn test_add_at_limit_ok() {
        let mut tasks = Vec::new();
        let exact = "x".repeat(MAX_TASK_TEXT);
        assert!(add_task(&mut tasks, &exact, at(1_000)).is_ok());
    }

    #[test]
    fn test_ids_unique_under_same_timestamp() {
        let mut tasks = Vec::new();
        // Same clock reading for every add — ids must still differ
        for _ in 0..5 {
            add_task(&mut tasks, "task", at(1_000)).unwrap();
        }
        let mut ids: Vec<_> = tasks.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_add_then_filter_all_has_new_item_first() {
        let mut tasks = sample_tasks();
        let id = add_task(&mut tasks, "front", at(9_000)).unwrap();
        let view = filter_tasks(&tasks, TaskFilter::All);
        assert_eq!(view[0].id, id);
    }

    // --- toggle ---

    #[test]
    fn test_toggle_flips_flag() {
        let mut tasks = sample_tasks();
        let id = tasks[0].id.clone();
        toggle_task(&mut tasks, &id).unwrap();
        assert!(tasks[0].completed);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut tasks = sample_tasks();
        let id = tasks[1].id.clone();
        let before = tasks[1].completed;
        toggle_task(&mut tasks, &id).unwrap();
        toggle_task(&mut tasks, &id).unwrap();
        assert_eq!(tasks[1].completed, before);
    }

    #[test]
    fn test_toggle_missing_id_leaves_state() {
        let mut tasks = sample_tasks();
        let snapshot = tasks.clone();
        assert!(matches!(
            toggle_task(&mut tasks, "nope"),
            Err(TaskError::NotFound(_))
        ));
        assert_eq!(tasks, snapshot);
    }

    // --- edit ---

    #[test]
    fn test_edit_replaces_text() {
        let mut tasks = sample_tasks();
        let id = tasks[0].id.clone();
        edit_task(&mut tasks, &id, "  revised  ").unwrap();
        assert_eq!(tasks[0].text, "revised");
    }

    #[test]
    fn test_edit_rejects_blank_keeps_old_text() {
        let mut tasks = sample_tasks();
        let id = tasks[0].id.clone();
        let old = tasks[0].text.clone();
        assert!(edit_task(&mut tasks, &id, "  ").is_err());
        assert_eq!(tasks[0].text, old);
    }

    // --- delete / clear ---

    #[test]
    fn test_delete_removes_only_match() {
        let mut tasks = sample_tasks();
        let id = tasks[1].id.clone();
        delete_task(&mut tasks, &id).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(!tasks.iter().any(|t| t.id == id));
    }

    #[test]
    fn test_delete_missing_is_error() {
        let mut tasks = sample_tasks();
        assert!(delete_task(&mut tasks, "nope").is_err());
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn test_clear_completed_idempotent() {
        let mut tasks = sample_tasks();
        let id = tasks[0].id.clone();
        toggle_task(&mut tasks, &id).unwrap();

        let removed = clear_completed(&mut tasks);
        assert_eq!(removed, 1);
        let after_once = tasks.clone();

        let removed_again = clear_completed(&mut tasks);
        assert_eq!(removed_again, 0);
        assert_eq!(tasks, after_once);
    }

    // --- views ---

    #[test]
    fn test_filter_views_partition_store() {
        let mut tasks = sample_tasks();
        let id = tasks[2].id.clone();
        toggle_task(&mut tasks, &id).unwrap();

        let all = filter_tasks(&tasks, TaskFilter::All);
        let active = filter_tasks(&tasks, TaskFilter::Active);
        let completed = filter_tasks(&tasks, TaskFilter::Completed);

        assert_eq!(all.len(), 3);
        assert_eq!(active.len(), 2);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, id);
    }

    #[test]
    fn test_filter_preserves_order_and_state() {
        let tasks = sample_tasks();
        let snapshot = tasks.clone();
        let view = filter_tasks(&tasks, TaskFilter::Active);
        let texts: Vec<_> = view.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["file taxes", "walk the dog", "buy milk"]);
        assert_eq!(tasks, snapshot);
    }
}
