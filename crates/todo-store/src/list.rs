//! The ordered todo collection and every operation that changes it.
//!
//! All operations are silent no-ops when handed an unknown id or blank text;
//! each returns whether the collection actually changed so the owner can
//! decide whether to persist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::item::{has_content, Priority, TodoItem};
use crate::view::Stats;

/// How [`TodoList::sort_by_priority`] orders the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Open todos first, completed todos last, each group by ascending priority level.
    #[default]
    CompletedLast,
    /// Ascending priority level only; completion is ignored.
    PriorityOnly,
}

/// An ordered list of todos. Order is user-significant.
///
/// Deserializing goes through [`TodoList::from_items`], so ids stay unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TodoItem>", into = "Vec<TodoItem>")]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from existing items, keeping their order.
    ///
    /// Items whose id was already seen earlier in the sequence are dropped, so
    /// ids stay unique.
    pub fn from_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    tracing::warn!(id = %item.id, "dropping todo with duplicate id");
                }
                fresh
            })
            .collect();
        Self { items }
    }

    /// Returns the items in list order.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Iterates over the items in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    /// Number of todos.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no todos.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a todo by exact id.
    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the position of a todo by exact id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Completion counts for the whole list.
    pub fn stats(&self) -> Stats {
        Stats::from_items(&self.items)
    }

    /// Adds a new todo at the front of the list.
    ///
    /// Returns the created todo, or `None` if `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<&TodoItem> {
        if !has_content(text) {
            return None;
        }
        self.items.insert(0, TodoItem::new(text));
        self.items.first()
    }

    /// Removes the todo with the given id.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self, id: &str) -> bool {
        self.update(id, |item| item.completed = !item.completed)
    }

    /// Flips the featured flag.
    pub fn toggle_featured(&mut self, id: &str) -> bool {
        self.update(id, |item| item.featured = !item.featured)
    }

    /// Sets the priority level.
    ///
    /// Returns false if the id is unknown or the todo already had this level.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.priority != priority => {
                item.priority = priority;
                true
            }
            _ => false,
        }
    }

    /// Replaces the text of a todo. Blank text is ignored.
    pub fn edit_text(&mut self, id: &str, new_text: &str) -> bool {
        if !has_content(new_text) {
            return false;
        }
        self.update(id, |item| item.text = new_text.to_string())
    }

    /// Removes every completed todo and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.completed);
        before - self.items.len()
    }

    /// Moves the dragged todo to the index the target todo occupies.
    ///
    /// This is a positional move: the dragged todo is taken out and reinserted
    /// at the target's original index, shifting the todos in between.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) -> bool {
        if dragged_id == target_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged_id), self.position(target_id)) else {
            return false;
        };

        let dragged = self.items.remove(from);
        self.items.insert(to, dragged);
        true
    }

    /// Stable sort by priority level, see [`SortOrder`].
    ///
    /// Returns true if the order changed.
    pub fn sort_by_priority(&mut self, order: SortOrder) -> bool {
        let before: Vec<String> = self.items.iter().map(|item| item.id.clone()).collect();

        match order {
            SortOrder::CompletedLast => self
                .items
                .sort_by_key(|item| (item.completed, item.priority)),
            SortOrder::PriorityOnly => self.items.sort_by_key(|item| item.priority),
        }

        self.items
            .iter()
            .zip(&before)
            .any(|(item, id)| item.id != *id)
    }

    /// Applies `f` to the todo with the given id.
    fn update(&mut self, id: &str, f: impl FnOnce(&mut TodoItem)) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<TodoList> for Vec<TodoItem> {
    fn from(list: TodoList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
