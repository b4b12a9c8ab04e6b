/// Task model and request payloads
///
/// This module provides the Task model as served by the MeeTask backend,
/// plus the draft form produced by minutes extraction and the payloads
/// used to create and patch tasks.
///
/// # Lifecycle
///
/// ```text
/// minutes text → extraction → DraftTask (unpersisted, editable)
///                               → save   → Task (server-assigned id)
/// manual add   → CreateTask     → Task
/// detail edit  → UpdateTask     → Task (field-level patch)
/// ```
///
/// # Wire format
///
/// All payloads are JSON. Deadlines are calendar dates (`YYYY-MM-DD`);
/// the backend emits naive ISO-8601 timestamps, so only the date part is
/// kept and no timezone arithmetic is performed.
///
/// # Example
///
/// ```
/// use meetask_shared::models::task::{Priority, Status, Task};
///
/// let json = r#"{
///     "id": 1,
///     "title": "Report",
///     "description": "",
///     "deadline": "2025-09-01",
///     "priority": "high",
///     "status": "not-started-yet"
/// }"#;
///
/// let task: Task = serde_json::from_str(json).unwrap();
/// assert_eq!(task.priority, Priority::High);
/// assert_eq!(task.status, Status::NotStartedYet);
/// assert!(task.assigned_user.is_none());
/// ```
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Error returned when parsing a priority or status from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    /// Which enum failed to parse ("priority" or "status")
    pub kind: &'static str,

    /// The rejected input
    pub value: String,
}

/// Task priority
///
/// Ranked `High > Middle > Low > NotSet` for sorting. Unknown wire values
/// deserialize to `NotSet` rather than failing the whole task list; the
/// backend drafts were inconsistent about unset priorities and the client
/// treats every unrecognized spelling the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Highest urgency
    High,

    /// Default urgency
    Middle,

    /// Lowest explicit urgency
    Low,

    /// No priority assigned (catch-all for unknown wire values)
    #[serde(other, rename = "unset")]
    NotSet,
}

impl Priority {
    /// All explicit priorities, in rank order (for filter sidebars)
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Middle, Priority::Low];

    /// Sort rank, lower is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Middle => 1,
            Priority::Low => 2,
            Priority::NotSet => 3,
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Middle => "middle",
            Priority::Low => "low",
            Priority::NotSet => "unset",
        }
    }

    fn not_set() -> Priority {
        Priority::NotSet
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "middle" => Ok(Priority::Middle),
            "low" => Ok(Priority::Low),
            "unset" => Ok(Priority::NotSet),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Task status
///
/// Bucket membership on the kanban board is a pure function of this
/// value: every task belongs to exactly one of the three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not picked up yet (left board column)
    NotStartedYet,

    /// Being worked on (middle column)
    InProgress,

    /// Finished (right column)
    Done,
}

impl Status {
    /// All statuses, in board column order
    pub const ALL: [Status; 3] = [Status::NotStartedYet, Status::InProgress, Status::Done];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStartedYet => "not-started-yet",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }

    fn not_started() -> Status {
        Status::NotStartedYet
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started-yet" => Ok(Status::NotStartedYet),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Reference to the member a task is assigned to
///
/// A task has at most one assignee, held by reference only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedUser {
    /// Member id
    pub id: i64,

    /// Display name
    pub user_name: String,

    /// Avatar URL
    pub picture: String,
}

/// A persisted task as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned unique id
    pub id: i64,

    /// Task title (non-empty)
    pub title: String,

    /// Longer description, may be empty
    #[serde(default)]
    pub description: String,

    /// Due date; renders as "unassigned" when absent
    #[serde(default, with = "deadline_format")]
    pub deadline: Option<NaiveDate>,

    /// Priority, `NotSet` when the backend never assigned one
    #[serde(default = "Priority::not_set")]
    pub priority: Priority,

    /// Board column the task belongs to
    pub status: Status,

    /// Assignee reference, expanded by the backend on detail reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<AssignedUser>,

    /// Owning group (absent on some list payloads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    /// Server-side creation timestamp (naive, backend-local)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Task {
    /// Id of the assigned member, if any
    pub fn assignee_id(&self) -> Option<i64> {
        self.assigned_user.as_ref().map(|u| u.id)
    }
}

/// An extraction-produced task draft, not yet persisted
///
/// Drafts live only in review-screen state; they become `Task`s when the
/// review save succeeds. The extraction backend may omit any field, so
/// everything but the title defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftTask {
    /// Proposed title
    pub title: String,

    /// Proposed description
    #[serde(default)]
    pub description: String,

    /// Proposed due date
    #[serde(default, with = "deadline_format")]
    pub deadline: Option<NaiveDate>,

    /// Proposed priority
    #[serde(default = "Priority::not_set")]
    pub priority: Priority,

    /// Initial board column, `not-started-yet` unless the minutes say otherwise
    #[serde(default = "Status::not_started")]
    pub status: Status,

    /// Member id picked during review, unassigned when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign: Option<i64>,
}

/// Payload for creating a single task manually
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Task title
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    /// Description, may be empty
    #[serde(default)]
    pub description: String,

    /// Due date
    #[serde(default, with = "deadline_format")]
    pub deadline: Option<NaiveDate>,

    /// Initial board column
    pub status: Status,

    /// Priority
    pub priority: Priority,

    /// Member id to assign, unassigned when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign: Option<i64>,
}

/// Field-level patch for `PUT /tasks/:taskId`
///
/// Only the fields present are sent; the detail screen commits one field
/// per edit, so a patch usually carries exactly one.
///
/// An absent field means "unchanged", so the wire contract has no way to
/// clear a deadline or assignee once set. Clearing those happens during
/// draft review, before the task is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,

    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New due date
    #[serde(default, with = "deadline_format", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    /// New board column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// New assignee member id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign: Option<i64>,
}

impl UpdateTask {
    /// Patch carrying only a status change
    pub fn status(status: Status) -> Self {
        UpdateTask {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Patch carrying only a priority change
    pub fn priority(priority: Priority) -> Self {
        UpdateTask {
            priority: Some(priority),
            ..Default::default()
        }
    }

    /// Patch carrying only a title change
    pub fn title(title: impl Into<String>) -> Self {
        UpdateTask {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Patch carrying only a deadline change
    pub fn deadline(deadline: NaiveDate) -> Self {
        UpdateTask {
            deadline: Some(deadline),
            ..Default::default()
        }
    }
}

/// Serde adapter for optional calendar-date deadlines
///
/// Accepts `YYYY-MM-DD` or a longer naive ISO-8601 timestamp (the date
/// part is kept); serializes back as `YYYY-MM-DD`. The backend emits
/// naive timestamps, so appending a `Z` and doing timezone math would be
/// wrong on both ends.
mod deadline_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => {
                // Boundary-safe cut: a value that is not sliceable at
                // byte 10 falls through whole and fails the parse below
                let date_part = s.get(..10).unwrap_or(&s);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}
