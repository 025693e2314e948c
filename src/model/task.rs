use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum task text length after trimming.
pub const MAX_TASK_TEXT: usize = 200;

/// A single todo item. Serde names match the persisted JSON records
/// (`createdAt`), so old browser exports stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    /// Unique within the task store; decimal millis at creation time.
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskItem {
    pub fn new(id: String, text: String, created_at: DateTime<Utc>) -> Self {
        TaskItem {
            id,
            text,
            completed: false,
            created_at,
        }
    }
}

/// View filter over the task store. Selecting a view never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn matches(self, task: &TaskItem) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

/// Parse a filter name from the CLI
pub fn parse_task_filter(s: &str) -> Result<TaskFilter, String> {
    match s {
        "all" => Ok(TaskFilter::All),
        "active" => Ok(TaskFilter::Active),
        "completed" | "done" => Ok(TaskFilter::Completed),
        _ => Err(format!(
            "unknown filter '{}' (expected: all, active, completed)",
            s
        )),
    }
}
