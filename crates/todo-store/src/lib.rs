//! Local todo list state.
//!
//! This crate owns the todo collection and everything derived from it:
//!
//! - [`TodoList`]: the ordered collection and its mutations
//! - [`ViewFilter`]: search, featured-only and status filtering
//! - [`StateStore`]: the JSON snapshot on disk
//! - [`ThemePreference`]: the dark-mode flag
//! - [`TodoApp`]: all of the above composed, with change notifications
//!
//! Sample data for a new profile comes from any [`SeedSource`], normally a
//! [`todo_seed::SeedClient`].

pub mod app;
pub mod item;
pub mod list;
pub mod lookup;
pub mod seed;
pub mod store;
pub mod theme;
pub mod view;

pub use app::{AppEvent, TodoApp};
pub use item::{InvalidPriority, Priority, TodoItem};
pub use list::{SortOrder, TodoList};
pub use lookup::LookupError;
pub use seed::SeedSource;
pub use store::{PersistedState, StateStore, StoreError};
pub use theme::ThemePreference;
pub use view::{Stats, StatusFilter, UnknownStatus, ViewFilter};
