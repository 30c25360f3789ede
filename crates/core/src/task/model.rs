//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Status of a task, serialized with the labels the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl TaskStatus {
    /// The wire/display label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Border color used by the list view to mark task state.
    pub fn border_color(&self) -> &'static str {
        match self {
            Self::InProgress => "#ffc107",
            Self::Completed => "#28a745",
            Self::Cancelled => "#b50c0c",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(Error::InvalidInput(format!(
                "Unknown task status: '{}'",
                other
            ))),
        }
    }
}

/// A single to-do record.
///
/// `description`, `location` and `status` carry defaults so a blob persisted
/// by an older build that lacks one of them still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Create a complete task from a draft: assigns a fresh id, stamps the
    /// creation instant, and defaults the status to in-progress.
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            date: Utc::now(),
            location: draft.location,
            status: draft.status.unwrap_or_default(),
        }
    }

    /// Apply a single-field change. `id` and `date` are not representable
    /// here, so they can never be rewritten through an update.
    pub fn apply(&mut self, change: TaskChange) {
        match change {
            TaskChange::Title(title) => self.title = title,
            TaskChange::Description(description) => self.description = description,
            TaskChange::Location(location) => self.location = location,
            TaskChange::Status(status) => self.status = status,
        }
    }
}

/// User-supplied fields for a task about to be created.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: Option<TaskStatus>,
}

impl TaskDraft {
    /// Create a draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A change to exactly one mutable field of a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskChange {
    Title(String),
    Description(String),
    Location(String),
    Status(TaskStatus),
}

/// Sort key for the task list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent creation date first.
    Date,
    /// Ascending lexical order of the status label.
    Status,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "status" => Ok(Self::Status),
            other => Err(Error::InvalidInput(format!(
                "Unknown sort order: '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_from_draft() {
        let draft = TaskDraft::new("Dentist")
            .with_description("Routine checkup")
            .with_location("Downtown");
        let task = Task::new(draft);

        assert_eq!(task.title, "Dentist");
        assert_eq!(task.description, "Routine checkup");
        assert_eq!(task.location, "Downtown");
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_draft_status_overrides_default() {
        let task = Task::new(TaskDraft::new("Done already").with_status(TaskStatus::Completed));
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn test_apply_changes_one_field() {
        let mut task = Task::new(TaskDraft::new("Groceries").with_location("Market"));
        let original_date = task.date;

        task.apply(TaskChange::Status(TaskStatus::Cancelled));

        assert_eq!(task.status, TaskStatus::Cancelled);
        assert_eq!(task.title, "Groceries");
        assert_eq!(task.location, "Market");
        assert_eq!(task.date, original_date);
    }

    #[test]
    fn test_status_wire_labels() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"Completed\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Cancelled).unwrap(),
            "\"Cancelled\""
        );
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        assert!("Paused".parse::<TaskStatus>().is_err());
        assert!("in progress".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_label() {
        assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
        assert_eq!(TaskStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_border_color_by_status() {
        assert_eq!(TaskStatus::Completed.border_color(), "#28a745");
        assert_eq!(TaskStatus::InProgress.border_color(), "#ffc107");
        assert_eq!(TaskStatus::Cancelled.border_color(), "#b50c0c");
    }

    #[test]
    fn test_task_json_round_trip() {
        let task = Task::new(
            TaskDraft::new("Flight")
                .with_description("Check in online")
                .with_location("Airport")
                .with_status(TaskStatus::Cancelled),
        );

        let encoded = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_legacy_blob_missing_fields_gets_defaults() {
        let raw = r#"{
            "id": "5f2b0c62-9a1a-4a0e-8e5e-3f6d35f3a001",
            "title": "Old record",
            "date": "2024-01-01T00:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.title, "Old record");
        assert_eq!(task.description, "");
        assert_eq!(task.location, "");
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("date".parse::<SortOrder>().unwrap(), SortOrder::Date);
        assert_eq!("status".parse::<SortOrder>().unwrap(), SortOrder::Status);
        assert!("priority".parse::<SortOrder>().is_err());
    }
}
