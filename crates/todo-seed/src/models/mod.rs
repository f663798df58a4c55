//! Wire types for the seed endpoint.

use serde::{Deserialize, Serialize};

/// A sample todo as served by the seed endpoint.
///
/// The endpoint serves JSONPlaceholder-shaped records:
/// `{"userId": 1, "id": 1, "title": "...", "completed": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTodo {
    /// The source-side identifier.
    pub id: u64,

    /// The owning user on the source side. Not used locally.
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// The todo text.
    pub title: String,

    /// Whether the todo is already done.
    #[serde(default)]
    pub completed: bool,
}
