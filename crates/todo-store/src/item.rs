//! The todo record and its priority levels.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Importance of a todo. Lower levels sort first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// Level 1.
    High = 1,
    /// Level 2, given to every new todo.
    #[default]
    Medium = 2,
    /// Level 3.
    Low = 3,
}

/// A priority level outside 1–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority {0}: expected 1 (high), 2 (medium) or 3 (low)")]
pub struct InvalidPriority(pub u8);

impl Priority {
    /// All levels, highest first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Returns the numeric level (1 = high, 3 = low).
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable name of the level.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single todo.
///
/// Serialized with camelCase keys (`createdAt`) so state files written by
/// earlier versions of the list keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Opaque identifier, unique within a list and stable for the item's lifetime.
    pub id: String,

    /// Display text. Never blank.
    pub text: String,

    /// Whether the todo is done.
    #[serde(default)]
    pub completed: bool,

    /// User-set highlight flag, independent of completion and priority.
    #[serde(default)]
    pub featured: bool,

    /// Importance level.
    #[serde(default)]
    pub priority: Priority,

    /// When the todo was created.
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a fresh todo with a random id, stamped with the current time.
    ///
    /// Callers are responsible for rejecting blank text; see
    /// [`TodoList::add`](crate::TodoList::add).
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), text, Utc::now())
    }

    /// Creates a todo with an explicit id and creation time.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            featured: false,
            priority: Priority::default(),
            created_at,
        }
    }
}

/// Returns true if `text` has any non-whitespace content.
pub(crate) fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}
