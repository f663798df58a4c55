//! Derived views over a todo list.
//!
//! A [`ViewFilter`] combines a text search, a featured-only switch and a
//! completion [`StatusFilter`]. Applying it never touches the source list and
//! always keeps the source order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::item::TodoItem;

/// Restriction on completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every todo.
    #[default]
    All,
    /// Todos that are not completed.
    Active,
    /// Completed todos.
    Completed,
}

impl StatusFilter {
    /// Returns true if `item` passes this filter.
    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !item.completed,
            StatusFilter::Completed => item.completed,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized status filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status filter '{0}': expected all, active or completed")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// The current view restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    /// Case-insensitive substring to look for in the text. Blank means no text filter.
    #[serde(default)]
    pub search: String,

    /// Keep only featured todos.
    #[serde(default)]
    pub featured_only: bool,

    /// Completion restriction.
    #[serde(default)]
    pub status: StatusFilter,
}

impl ViewFilter {
    /// A filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the featured-only switch.
    pub fn with_featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    /// Sets the status restriction.
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Returns true if any restriction is in effect.
    ///
    /// Front ends use this to tell "nothing matches" apart from "nothing yet".
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.featured_only || self.status != StatusFilter::All
    }

    /// Returns true if `item` passes every predicate.
    pub fn matches(&self, item: &TodoItem) -> bool {
        self.matches_search(item)
            && (!self.featured_only || item.featured)
            && self.status.matches(item)
    }

    /// Returns the items that pass, in source order.
    pub fn apply<'a>(&self, items: &'a [TodoItem]) -> Vec<&'a TodoItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    fn matches_search(&self, item: &TodoItem) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        item.text
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }
}

/// Completion counts over a set of todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of todos.
    pub total: usize,
    /// Number of completed todos.
    pub completed: usize,
    /// Number of open todos.
    pub active: usize,
}

impl Stats {
    /// Counts `items`.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a TodoItem>) -> Self {
        items.into_iter().fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            if item.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
            }
            stats
        })
    }
}
