//! The composed todo application state.
//!
//! `TodoApp` owns the list, the view filter, the theme preference and the
//! state file. Every change to the list goes through it so that the snapshot
//! on disk, the recomputed view and any subscribers stay in step:
//!
//! 1. the [`TodoList`] operation runs and reports whether anything changed;
//! 2. on change the visible view is recomputed and subscribers are notified;
//! 3. the full snapshot is written to the [`StateStore`].
//!
//! # Example
//!
//! ```no_run
//! use todo_seed::SeedClient;
//! use todo_store::{StateStore, StatusFilter, TodoApp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = TodoApp::open(StateStore::new()?)?;
//!
//!     // First run: pull in a few sample todos (failures leave the list empty)
//!     app.seed(&SeedClient::new()?).await?;
//!
//!     app.add("Buy milk")?;
//!     app.set_status(StatusFilter::Active);
//!     for item in app.visible() {
//!         println!("{} {}", item.id, item.text);
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

use crate::item::{Priority, TodoItem};
use crate::list::{SortOrder, TodoList};
use crate::seed::{self, SeedSource};
use crate::store::{PersistedState, Result, StateStore};
use crate::theme::ThemePreference;
use crate::view::{Stats, StatusFilter, ViewFilter};

/// A change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The todo collection changed (and the view was recomputed).
    TodosChanged,
    /// The view filter changed (and the view was recomputed).
    ViewChanged,
    /// A seed fetch started (`true`) or finished (`false`).
    LoadingChanged(bool),
    /// The dark-mode flag changed to the given value.
    DarkModeChanged(bool),
}

type Subscriber = Box<dyn FnMut(&AppEvent)>;

/// Owner of all todo state for one profile.
///
/// `TodoApp` is not [`Sync`]; every method that changes state takes
/// `&mut self`, so there is exactly one writer at a time.
pub struct TodoApp {
    store: StateStore,
    list: TodoList,
    filter: ViewFilter,
    /// Indices into `list` of the todos passing `filter`, in list order.
    visible: Vec<usize>,
    theme: ThemePreference,
    sort_order: SortOrder,
    needs_seed: bool,
    loading: bool,
    subscribers: Vec<Subscriber>,
}

impl TodoApp {
    /// Opens the profile stored in `store`.
    ///
    /// A missing state file is an empty profile that still needs seeding.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file exists but cannot be read or parsed.
    pub fn open(store: StateStore) -> Result<Self> {
        let state = store.load_or_default()?;
        let theme = ThemePreference::resolve_with_host(state.dark_mode);
        Ok(Self::from_state(store, state, theme))
    }

    /// Async form of [`open`](Self::open), reading the state file with `tokio::fs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file exists but cannot be read or parsed.
    pub async fn open_async(store: StateStore) -> Result<Self> {
        let state = store.load_or_default_async().await?;
        let theme = ThemePreference::resolve_with_host(state.dark_mode);
        Ok(Self::from_state(store, state, theme))
    }

    /// Builds an app from an already-loaded snapshot.
    pub fn from_state(store: StateStore, state: PersistedState, theme: ThemePreference) -> Self {
        let needs_seed = state.todos.is_none();
        let list = TodoList::from_items(state.todos.unwrap_or_default());

        let mut app = Self {
            store,
            list,
            filter: ViewFilter::default(),
            visible: Vec::new(),
            theme,
            sort_order: SortOrder::default(),
            needs_seed,
            loading: false,
            subscribers: Vec::new(),
        };
        app.recompute_view();
        app
    }

    /// Sets the ordering used by [`sort_by_priority`](Self::sort_by_priority).
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Registers a callback for change notifications.
    pub fn subscribe(&mut self, callback: impl FnMut(&AppEvent) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    // ==================== Accessors ====================

    /// The full collection in list order.
    pub fn list(&self) -> &TodoList {
        &self.list
    }

    /// The todos passing the current filter, in list order.
    pub fn visible(&self) -> Vec<&TodoItem> {
        self.visible
            .iter()
            .filter_map(|&index| self.list.items().get(index))
            .collect()
    }

    /// The current view filter.
    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// Completion counts for the whole collection.
    pub fn stats(&self) -> Stats {
        self.list.stats()
    }

    /// Whether the collection has never been persisted.
    pub fn needs_seed(&self) -> bool {
        self.needs_seed
    }

    /// Whether a seed fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The ordering used by [`sort_by_priority`](Self::sort_by_priority).
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The backing state store.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    // ==================== Seeding ====================

    /// Loads sample todos if the collection was never persisted.
    ///
    /// A failing source is logged and leaves the collection empty; it is not
    /// an error. Returns the number of todos added.
    ///
    /// # Errors
    ///
    /// Only persistence failures are returned.
    pub async fn seed<S: SeedSource>(&mut self, source: &S) -> Result<usize> {
        if !self.needs_seed {
            return Ok(0);
        }
        self.load_seed(source).await
    }

    /// Replaces the collection with fresh sample todos.
    ///
    /// On a failing source the current collection is kept.
    ///
    /// # Errors
    ///
    /// Only persistence failures are returned.
    pub async fn reseed<S: SeedSource>(&mut self, source: &S) -> Result<usize> {
        self.load_seed(source).await
    }

    async fn load_seed<S: SeedSource>(&mut self, source: &S) -> Result<usize> {
        self.set_loading(true);
        let fetched = source.fetch().await;
        self.set_loading(false);

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load sample todos");
                return Ok(0);
            }
        };

        let items = seed::to_items(records, &mut rand::rng());
        let count = items.len();
        tracing::info!(count, "loaded sample todos");

        self.list = TodoList::from_items(items);
        self.needs_seed = false;
        self.recompute_view();
        self.notify(AppEvent::TodosChanged);
        self.store.save_async(&self.snapshot()).await?;
        Ok(count)
    }

    // ==================== Item Store ====================

    /// Adds a todo at the front. Blank text is ignored.
    ///
    /// Returns a copy of the created todo.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add(&mut self, text: &str) -> Result<Option<TodoItem>> {
        let created = self.list.add(text).cloned();
        if created.is_some() {
            self.commit()?;
        }
        Ok(created)
    }

    /// Removes a todo. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let changed = self.list.remove(id);
        self.commit_if(changed)
    }

    /// Flips the completion flag. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool> {
        let changed = self.list.toggle_completed(id);
        self.commit_if(changed)
    }

    /// Flips the featured flag. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn toggle_featured(&mut self, id: &str) -> Result<bool> {
        let changed = self.list.toggle_featured(id);
        self.commit_if(changed)
    }

    /// Sets the priority level. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Result<bool> {
        let changed = self.list.set_priority(id, priority);
        self.commit_if(changed)
    }

    /// Replaces the text of a todo. Blank text and unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn edit_text(&mut self, id: &str, new_text: &str) -> Result<bool> {
        let changed = self.list.edit_text(id, new_text);
        self.commit_if(changed)
    }

    /// Removes every completed todo. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let removed = self.list.clear_completed();
        self.commit_if(removed > 0)?;
        Ok(removed)
    }

    /// Moves the dragged todo to the target's position.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) -> Result<bool> {
        let changed = self.list.reorder(dragged_id, target_id);
        self.commit_if(changed)
    }

    /// Sorts by priority using the configured [`SortOrder`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn sort_by_priority(&mut self) -> Result<bool> {
        let changed = self.list.sort_by_priority(self.sort_order);
        self.commit_if(changed)
    }

    // ==================== View Filter ====================

    /// Replaces the whole filter.
    pub fn set_filter(&mut self, filter: ViewFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.filter_changed();
        }
    }

    /// Sets the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.filter.search != search {
            self.filter.search = search;
            self.filter_changed();
        }
    }

    /// Sets the featured-only switch.
    pub fn set_featured_only(&mut self, featured_only: bool) {
        if self.filter.featured_only != featured_only {
            self.filter.featured_only = featured_only;
            self.filter_changed();
        }
    }

    /// Sets the status restriction.
    pub fn set_status(&mut self, status: StatusFilter) {
        if self.filter.status != status {
            self.filter.status = status;
            self.filter_changed();
        }
    }

    // ==================== Theme ====================

    /// Whether dark mode is on.
    pub fn dark_mode(&self) -> bool {
        self.theme.is_dark()
    }

    /// The resolved theme preference.
    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Records an explicit dark-mode choice and persists it.
    ///
    /// Returns true if the flag changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn set_dark_mode(&mut self, dark: bool) -> Result<bool> {
        let was_explicit = self.theme.is_explicit();
        let changed = self.theme.set(dark);
        if changed {
            self.notify(AppEvent::DarkModeChanged(dark));
        }
        if changed || !was_explicit {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Flips dark mode and persists the choice. Returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        let dark = !self.theme.is_dark();
        self.set_dark_mode(dark)?;
        Ok(dark)
    }

    /// Follows a host color-scheme change unless the user chose explicitly.
    ///
    /// Returns true if the flag changed. Nothing is persisted.
    pub fn system_preference_changed(&mut self, dark: bool) -> bool {
        let changed = self.theme.follow_system(dark);
        if changed {
            self.notify(AppEvent::DarkModeChanged(dark));
        }
        changed
    }

    // ==================== Internals ====================

    /// The snapshot written to disk.
    ///
    /// While the collection still needs seeding the `todos` key stays absent so
    /// that saving only a theme choice does not suppress the first-run seed.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            todos: (!self.needs_seed).then(|| self.list.items().to_vec()),
            dark_mode: self.theme.persisted(),
        }
    }

    fn commit_if(&mut self, changed: bool) -> Result<bool> {
        if changed {
            self.commit()?;
        }
        Ok(changed)
    }

    fn commit(&mut self) -> Result<()> {
        self.needs_seed = false;
        self.recompute_view();
        self.notify(AppEvent::TodosChanged);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.snapshot())
    }

    fn filter_changed(&mut self) {
        self.recompute_view();
        self.notify(AppEvent::ViewChanged);
    }

    fn recompute_view(&mut self) {
        let filter = &self.filter;
        self.visible = self
            .list
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.matches(item))
            .map(|(index, _)| index)
            .collect();
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.notify(AppEvent::LoadingChanged(loading));
        }
    }

    fn notify(&mut self, event: AppEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }
}

impl fmt::Debug for TodoApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoApp")
            .field("store", &self.store)
            .field("todos", &self.list.len())
            .field("filter", &self.filter)
            .field("visible", &self.visible.len())
            .field("theme", &self.theme)
            .field("needs_seed", &self.needs_seed)
            .field("loading", &self.loading)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::{tempdir, TempDir};
    use todo_seed::{ApiError, SeedTodo};

    struct FakeSource(std::result::Result<Vec<SeedTodo>, ApiError>);

    impl SeedSource for FakeSource {
        async fn fetch(&self) -> todo_seed::Result<Vec<SeedTodo>> {
            self.0.clone().map_err(todo_seed::Error::from)
        }
    }

    fn records(n: u64) -> Vec<SeedTodo> {
        (1..=n)
            .map(|id| SeedTodo {
                id,
                user_id: None,
                title: format!("sample {id}"),
                completed: id % 2 == 0,
            })
            .collect()
    }

    fn failing() -> FakeSource {
        FakeSource(Err(ApiError::Network {
            message: "connection refused".to_string(),
        }))
    }

    fn empty_app() -> (TempDir, TodoApp) {
        let dir = tempdir().expect("failed to create temp dir");
        let store = StateStore::with_path(dir.path().join("state.json"));
        let app = TodoApp::from_state(
            store,
            PersistedState::default(),
            ThemePreference::resolve(None, false),
        );
        (dir, app)
    }

    fn reload(app: &TodoApp) -> PersistedState {
        app.store().load().expect("state file should exist")
    }

    #[test]
    fn test_new_profile_needs_seed() {
        let (_dir, app) = empty_app();
        assert!(app.needs_seed());
        assert!(app.list().is_empty());
        assert!(!app.store().exists());
    }

    #[test]
    fn test_add_persists_and_updates_view() {
        let (_dir, mut app) = empty_app();

        let item = app.add("Buy milk").unwrap().unwrap();

        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.visible()[0].id, item.id);
        assert!(!app.needs_seed());

        let saved = reload(&app);
        assert_eq!(saved.todos.unwrap(), vec![item]);
    }

    #[test]
    fn test_blank_add_does_not_touch_disk() {
        let (_dir, mut app) = empty_app();

        assert!(app.add("   ").unwrap().is_none());
        assert!(app.list().is_empty());
        assert!(!app.store().exists());
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let (_dir, mut app) = empty_app();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        app.subscribe(move |event| sink.borrow_mut().push(*event));

        let id = app.add("a").unwrap().unwrap().id;
        app.toggle_completed(&id).unwrap();
        app.toggle_completed("missing").unwrap();
        app.set_status(StatusFilter::Active);
        app.set_status(StatusFilter::Active);

        assert_eq!(
            *events.borrow(),
            vec![
                AppEvent::TodosChanged,
                AppEvent::TodosChanged,
                AppEvent::ViewChanged
            ]
        );
    }

    #[test]
    fn test_view_recomputed_after_mutation() {
        let (_dir, mut app) = empty_app();
        let id = app.add("Walk the dog").unwrap().unwrap().id;
        app.add("Buy milk").unwrap();
        app.set_status(StatusFilter::Active);
        assert_eq!(app.visible().len(), 2);

        app.toggle_completed(&id).unwrap();

        let visible: Vec<&str> = app.visible().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(visible, vec!["Buy milk"]);
    }

    #[test]
    fn test_filter_setters_compose() {
        let (_dir, mut app) = empty_app();
        let milk = app.add("Buy milk").unwrap().unwrap().id;
        app.add("Buy bread").unwrap();
        app.toggle_featured(&milk).unwrap();

        app.set_search("BUY");
        assert_eq!(app.visible().len(), 2);
        app.set_featured_only(true);
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.visible()[0].id, milk);

        app.set_filter(ViewFilter::default());
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn test_clear_completed_and_sort() {
        let (_dir, mut app) = empty_app();
        let c = app.add("c").unwrap().unwrap().id;
        let b = app.add("b").unwrap().unwrap().id;
        let a = app.add("a").unwrap().unwrap().id;
        app.set_priority(&b, Priority::High).unwrap();
        app.set_priority(&c, Priority::Low).unwrap();
        app.toggle_completed(&b).unwrap();

        assert!(app.sort_by_priority().unwrap());
        let order: Vec<&str> = app.list().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec![a.as_str(), c.as_str(), b.as_str()]);

        assert_eq!(app.clear_completed().unwrap(), 1);
        assert_eq!(app.clear_completed().unwrap(), 0);
        assert_eq!(reload(&app).todos.unwrap().len(), 2);
    }

    #[test]
    fn test_priority_only_sort_order() {
        let (_dir, app) = empty_app();
        let mut app = app.with_sort_order(SortOrder::PriorityOnly);
        let low = app.add("low").unwrap().unwrap().id;
        let high = app.add("high").unwrap().unwrap().id;
        app.set_priority(&low, Priority::Low).unwrap();
        app.set_priority(&high, Priority::High).unwrap();
        app.toggle_completed(&high).unwrap();

        app.sort_by_priority().unwrap();
        assert_eq!(app.list().items()[0].id, high);
    }

    #[test]
    fn test_dark_mode_persists_without_suppressing_seed() {
        let (_dir, mut app) = empty_app();
        assert!(!app.dark_mode());

        assert!(app.set_dark_mode(true).unwrap());
        assert!(app.dark_mode());

        let saved = reload(&app);
        assert_eq!(saved.dark_mode, Some(true));
        assert!(saved.todos.is_none());
        assert!(app.needs_seed());
    }

    #[test]
    fn test_dark_mode_explicit_same_value_still_persisted() {
        let (_dir, mut app) = empty_app();

        assert!(!app.set_dark_mode(false).unwrap());
        assert_eq!(reload(&app).dark_mode, Some(false));
    }

    #[test]
    fn test_toggle_dark_mode_notifies() {
        let (_dir, mut app) = empty_app();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        app.subscribe(move |event| sink.borrow_mut().push(*event));

        assert!(app.toggle_dark_mode().unwrap());
        assert!(!app.toggle_dark_mode().unwrap());

        assert_eq!(
            *events.borrow(),
            vec![
                AppEvent::DarkModeChanged(true),
                AppEvent::DarkModeChanged(false)
            ]
        );
    }

    #[test]
    fn test_system_preference_ignored_after_explicit_choice() {
        let (_dir, mut app) = empty_app();

        assert!(app.system_preference_changed(true));
        assert!(app.dark_mode());

        app.set_dark_mode(false).unwrap();
        assert!(!app.system_preference_changed(true));
        assert!(!app.dark_mode());
    }

    #[tokio::test]
    async fn test_seed_success_populates_and_persists() {
        let (_dir, mut app) = empty_app();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        app.subscribe(move |event| sink.borrow_mut().push(*event));

        let count = app.seed(&FakeSource(Ok(records(5)))).await.unwrap();

        assert_eq!(count, 5);
        assert_eq!(app.list().len(), 5);
        assert_eq!(app.visible().len(), 5);
        assert!(!app.needs_seed());
        assert!(!app.is_loading());
        assert_eq!(reload(&app).todos.unwrap().len(), 5);
        assert_eq!(
            *events.borrow(),
            vec![
                AppEvent::LoadingChanged(true),
                AppEvent::LoadingChanged(false),
                AppEvent::TodosChanged
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_failure_falls_back_to_empty() {
        let (_dir, mut app) = empty_app();

        let count = app.seed(&failing()).await.unwrap();

        assert_eq!(count, 0);
        assert!(app.list().is_empty());
        assert!(app.needs_seed());
        assert!(!app.is_loading());
        assert!(!app.store().exists());
    }

    #[tokio::test]
    async fn test_seed_skipped_when_already_persisted() {
        let (_dir, mut app) = empty_app();
        app.add("mine").unwrap();

        let count = app.seed(&FakeSource(Ok(records(3)))).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(app.list().len(), 1);
    }

    #[tokio::test]
    async fn test_reseed_failure_keeps_current_list() {
        let (_dir, mut app) = empty_app();
        app.add("mine").unwrap();

        assert_eq!(app.reseed(&failing()).await.unwrap(), 0);
        assert_eq!(app.list().len(), 1);

        assert_eq!(app.reseed(&FakeSource(Ok(records(2)))).await.unwrap(), 2);
        assert_eq!(app.list().len(), 2);
        assert!(app.list().get("1").is_some());
    }
}
