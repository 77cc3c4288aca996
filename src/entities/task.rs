//! Task entity type

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Priority, Record};
use crate::core::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// A to-do item, optionally tied to another record by an informal reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: RecordId,

    pub title: String,

    pub due_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveTime>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: TaskStatus,

    pub assigned_to: String,

    /// Free-text pointer to the record this task is about (e.g. "L003")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub assigned_to: String,
    pub related_to: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
    pub related_to: Option<String>,
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;

    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn create(id: RecordId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            due_date: draft.due_date,
            due_time: draft.due_time,
            priority: draft.priority,
            status: draft.status,
            assigned_to: draft.assigned_to,
            related_to: draft.related_to,
        }
    }

    fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(due_time) = patch.due_time {
            self.due_time = Some(due_time);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(related_to) = patch.related_to {
            self.related_to = Some(related_to);
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task::create(
            RecordId::new(EntityKind::Task, 1),
            TaskDraft {
                title: "Prepare contract".to_string(),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                due_time: None,
                priority: Priority::High,
                status: TaskStatus::Pending,
                assigned_to: "Fatima".to_string(),
                related_to: Some("D002".to_string()),
            },
        )
    }

    #[test]
    fn test_apply_merges_only_patched_fields() {
        let mut task = task();
        task.apply(TaskPatch {
            status: Some(TaskStatus::Completed),
            due_time: Some(NaiveTime::from_hms_opt(14, 0, 0).unwrap()),
            ..Default::default()
        });

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.due_time, NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(task.title, "Prepare contract");
        assert_eq!(task.related_to.as_deref(), Some("D002"));
    }

    #[test]
    fn test_status_parses_done_alias() {
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert!("stalled".parse::<TaskStatus>().is_err());
    }
}
