//! Task records, requests and list ordering.
//!
//! # Invariants
//! - New tasks start as `pending`.
//! - `completed_at` is present exactly when `status == completed`.
//! - `due_date` is always a canonical `YYYY-MM-DD` date when set.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Sort rank: `high` first, then `medium`, then `low`.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Input for creating a task. `due_date` accepts keywords and free-form dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update applied field-by-field; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Conjunctive list filters. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Inclusive upper bound; normalized like any other date input.
    #[serde(default)]
    pub due_before: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    /// Keeps tasks sharing at least one tag. Empty lists are ignored.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Agenda buckets relative to one target date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyAgenda {
    /// Open tasks due on the target date.
    pub tasks: Vec<Task>,
    /// Open tasks due before the target date.
    pub overdue: Vec<Task>,
    /// First open tasks due after the target date, in collection order.
    pub upcoming: Vec<Task>,
}

/// Orders tasks by priority (`high` first), then by due date.
///
/// Tasks inside one priority keep their relative input order, except that
/// tasks with a due date are rearranged among the positions held by dated
/// tasks so those appear in ascending date order. Undated tasks stay where
/// they were.
pub fn sort_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut buckets: [Vec<Task>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for task in tasks {
        buckets[usize::from(task.priority.rank())].push(task);
    }

    let mut ordered = Vec::new();
    for bucket in buckets {
        ordered.extend(order_by_due_date(bucket));
    }
    ordered
}

fn order_by_due_date(bucket: Vec<Task>) -> Vec<Task> {
    let dated_slots: Vec<usize> = bucket
        .iter()
        .enumerate()
        .filter(|(_, task)| task.due_date.is_some())
        .map(|(index, _)| index)
        .collect();

    let mut slots: Vec<Option<Task>> = bucket.into_iter().map(Some).collect();
    let mut dated: Vec<Task> = dated_slots
        .iter()
        .filter_map(|index| slots[*index].take())
        .collect();
    dated.sort_by(|left, right| left.due_date.cmp(&right.due_date));

    for (index, task) in dated_slots.into_iter().zip(dated) {
        slots[index] = Some(task);
    }
    slots.into_iter().flatten().collect()
}
