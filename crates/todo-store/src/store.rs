//! State file storage with XDG path support.
//!
//! The whole profile (todos plus the dark-mode preference) is kept in a single
//! JSON snapshot at `~/.local/share/todo/state.json`. Every write replaces the
//! file in full; last write wins.
//!
//! Both synchronous and asynchronous I/O methods are provided:
//! - `save()`, `load()` - Synchronous methods using `std::fs`
//! - `save_async()`, `load_async()` - Asynchronous methods using `tokio::fs`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::TodoItem;

/// Default state filename.
const STATE_FILENAME: &str = "state.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "todo";

/// Errors that can occur during state storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read state file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write state file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Everything persisted for one profile.
///
/// Both keys are optional: a missing `todos` key means the list was never
/// written (and should be seeded), while an empty array is a list the user
/// emptied. A missing `darkMode` key means "follow the host preference".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// The todo collection, in list order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<TodoItem>>,

    /// Explicit dark-mode choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

/// Persistent storage for the profile state.
///
/// `StateStore` reads and writes the snapshot using XDG-compliant paths. On
/// Linux the file lives at `~/.local/share/todo/state.json`.
///
/// # Example
///
/// ```no_run
/// use todo_store::{PersistedState, StateStore};
///
/// let store = StateStore::new()?;
///
/// // Load existing state or start fresh
/// let state = store.load_or_default()?;
///
/// // Save state to disk
/// store.save(&state)?;
/// # Ok::<(), todo_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    /// Path to the state file.
    path: PathBuf,
}

impl StateStore {
    /// Creates a new `StateStore` with the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `StateStore` with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG path for the state file.
    ///
    /// On Linux: `~/.local/share/todo/state.json`
    /// On macOS: `~/Library/Application Support/todo/state.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\todo\data\state.json`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(StoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(STATE_FILENAME))
    }

    /// Returns the path to the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the state from disk.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` if the file cannot be read (including
    ///   when it does not exist; see [`load_or_default`](Self::load_or_default)).
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<PersistedState> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the state from disk, returning an empty state if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<PersistedState> {
        match self.load() {
            Ok(state) => Ok(state),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(PersistedState::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the state to disk atomically.
    ///
    /// Creates the parent directory if it doesn't exist and writes through a
    /// temp file followed by a rename.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `StoreError::WriteError` if the file cannot be written.
    /// - Returns `StoreError::Json` if serialization fails.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(state)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| StoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "state saved");
        Ok(())
    }

    /// Returns true if the state file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    // =========================================================================
    // Async I/O Methods
    // =========================================================================

    /// Loads the state from disk asynchronously.
    ///
    /// # Errors
    ///
    /// Same as [`load()`](Self::load).
    pub async fn load_async(&self) -> Result<PersistedState> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the state asynchronously, returning an empty state if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Same as [`load_or_default()`](Self::load_or_default).
    pub async fn load_or_default_async(&self) -> Result<PersistedState> {
        match self.load_async().await {
            Ok(state) => Ok(state),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(PersistedState::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the state to disk asynchronously using atomic write.
    ///
    /// # Errors
    ///
    /// Same as [`save()`](Self::save).
    pub async fn save_async(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::CreateDirError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let json = serde_json::to_string_pretty(state)?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| StoreError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }

}
