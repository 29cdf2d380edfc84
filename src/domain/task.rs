use crate::domain::list::ListId;
use crate::error::{LystraError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque persistent identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do item belonging to exactly one list at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// The list this task currently belongs to; mutated by a cross-list move.
    pub list_id: ListId,
    /// Zero-based index within the owning list's task sequence.
    pub position: usize,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: TaskId, name: String, list_id: ListId, position: usize) -> Self {
        Self {
            id,
            name,
            completed: false,
            deadline: None,
            list_id,
            position,
            created_at: Utc::now(),
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Checks whether the deadline has passed relative to `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline.map(|d| d < today).unwrap_or(false)
    }
}

/// Parses a `YYYY-MM-DD` deadline string.
///
/// The year segment must be exactly 4 ASCII digits (1000-9999); anything
/// else is rejected so the UI can clear the field instead of storing a
/// nonsense date.
pub fn parse_deadline(input: &str) -> Result<NaiveDate> {
    let year = input.split('-').next().unwrap_or("");
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LystraError::InvalidDeadline(input.to_string()));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| LystraError::InvalidDeadline(input.to_string()))
}

/// Payload for creating a task through the persistence backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub list_id: ListId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Partial update applied to a task by the persistence backend.
///
/// `list_id` is the field driving cross-list moves; `deadline` uses a
/// double option so a patch can distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<ListId>,
}

impl TaskPatch {
    pub fn move_to(list_id: ListId) -> Self {
        Self {
            list_id: Some(list_id),
            ..Self::default()
        }
    }
}
