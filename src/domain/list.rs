use serde::{Deserialize, Serialize};
use std::fmt;

/// Default card color assigned by the backend when none is chosen.
pub const DEFAULT_COLOR: &str = "#334155";

/// Opaque persistent identifier for a list.
///
/// Assigned by the persistence backend on creation and stable across
/// reorders; display position is never part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered container of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Zero-based index into the board's list sequence. Unique,
    /// contiguous, and gapless; recomputed on every structural change.
    pub position: usize,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl TodoList {
    pub fn new(id: ListId, name: String, position: usize) -> Self {
        Self {
            id,
            name,
            color: default_color(),
            position,
        }
    }

    pub fn with_color(mut self, color: String) -> Self {
        self.color = color;
        self
    }
}

/// Partial update applied to a list by the persistence backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ListPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }
}
