//! Task Tracker Library
//!
//! A personal task tracker: tasks with a category, a priority level, a
//! status, a deadline and reminders, persisted to a single JSON file.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Front-end Layer**: `TaskTracker` and `handlers` - Turn user actions into store calls and messages
//! - **Domain Layer**: `tracker` module - Entity store, its invariants and queries
//! - **Persistence Layer**: `storage` module - Whole-store JSON file load and save
//!
//! # Example
//!
//! ```no_run
//! use task_tracker::TaskTracker;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut tracker = TaskTracker::new("data/tasks.json")?;
//!     tracker.handle_add_category("Home".to_string())?;
//!     tracker.shutdown()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod formatting;
pub mod handlers;
pub mod storage;
pub mod tracker;
pub mod validation;

use anyhow::Result;
use log::warn;
use std::path::Path;

// Re-export commonly used types
pub use error::{ErrorKind, StoreError, StoreResult};
pub use storage::Storage;
pub use tracker::{
    Category, CategoryId, PriorityId, PriorityLevel, Reminder, ReminderKind, SearchCriteria, Task,
    TaskEdit, TaskId, TaskStatus, TaskStore, TaskSummary,
};

/// Application object tying the store to its data file
///
/// The store is loaded when the tracker is created and written back on
/// `shutdown`, or on drop if there are unsaved changes.
pub struct TaskTracker {
    pub(crate) store: TaskStore,
    pub(crate) storage: Storage,
    dirty: bool,
}

impl TaskTracker {
    /// Create a tracker backed by the given data file
    ///
    /// A missing file starts an empty store. A file that exists but cannot
    /// be read or parsed is an error, so it is never overwritten by mistake.
    ///
    /// # Example
    /// ```no_run
    /// # use task_tracker::TaskTracker;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let tracker = TaskTracker::new("data/tasks.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: impl AsRef<Path>) -> Result<Self> {
        let storage = Storage::new(storage_path);
        let store = storage.load()?;
        Ok(Self::with_store(store, storage))
    }

    /// Create a tracker around an already built store
    pub fn with_store(store: TaskStore, storage: Storage) -> Self {
        Self {
            store,
            storage,
            dirty: false,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Whether there are changes not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Write the store to its data file
    pub fn save_data(&mut self) -> Result<()> {
        self.storage.save(&self.store)?;
        self.dirty = false;
        Ok(())
    }

    /// Save pending changes before exit
    ///
    /// The save is attempted once. A failure is returned to the caller and
    /// the tracker is no longer dirty, so dropping it does not retry.
    pub fn shutdown(&mut self) -> Result<()> {
        if std::mem::take(&mut self.dirty) {
            self.storage.save(&self.store)?;
        }
        Ok(())
    }
}

impl Drop for TaskTracker {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_data() {
                warn!("Saving on shutdown failed: {:#}", e);
            }
        }
    }
}
