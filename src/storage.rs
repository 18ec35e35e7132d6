//! JSON persistence for the task store
//!
//! The file holds three parallel lists. Tasks refer to their category and
//! priority by title, and are re-linked to the freshly loaded entities on
//! load, so handles never need to survive a save.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tracker::{Reminder, Task, TaskId, TaskStatus, TaskStore};

/// Data file used when no path is given
pub const DEFAULT_DATA_FILE: &str = "data/tasks.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRecord {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task handle; older files without it get fresh handles on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Category title
    pub category: Option<String>,
    /// Priority title
    pub priority: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

/// The on-disk document
///
/// Missing sections read as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerDocument {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub priorities: Vec<PriorityRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl TrackerDocument {
    /// Snapshot a store, keeping every collection's order
    pub fn from_store(store: &TaskStore) -> Self {
        let categories = store
            .categories()
            .iter()
            .map(|c| CategoryRecord {
                title: c.title().to_string(),
            })
            .collect();
        let priorities = store
            .priorities()
            .iter()
            .map(|p| PriorityRecord {
                title: p.title().to_string(),
            })
            .collect();
        let tasks = store
            .tasks()
            .iter()
            .map(|task| TaskRecord {
                id: Some(task.id().0),
                title: task.title.clone(),
                description: task.description.clone(),
                status: task.status,
                category: store.category_of(task).map(|c| c.title().to_string()),
                priority: store.priority_of(task).map(|p| p.title().to_string()),
                deadline: task.deadline,
                reminders: task.reminders().to_vec(),
            })
            .collect();

        Self {
            categories,
            priorities,
            tasks,
        }
    }

    /// Build a fresh store from this document
    ///
    /// Categories are added first, then priorities, then tasks, so task
    /// references can be resolved by title. A title that resolves to nothing
    /// leaves the reference empty. Stored data is trusted: titles and
    /// reminders are taken as-is, and stored task handles are kept so the
    /// IDs a user saw in one run still name the same tasks in the next.
    pub fn into_store(self) -> TaskStore {
        let mut store = TaskStore::new();

        for record in self.categories {
            store.restore_category(record.title);
        }
        for record in self.priorities {
            store.restore_priority(record.title);
        }

        let max_id = self.tasks.iter().filter_map(|r| r.id).max().unwrap_or(0);
        store.reserve_task_ids(max_id);

        for record in self.tasks {
            let category = record
                .category
                .as_deref()
                .and_then(|title| store.find_category_by_title(title))
                .map(|c| c.id());
            let priority = record
                .priority
                .as_deref()
                .and_then(|title| store.find_priority_by_title(title))
                .map(|p| p.id());

            let mut task = Task::new(record.title).with_priority(priority);
            task.description = record.description;
            task.category = category;
            task.deadline = record.deadline;
            task.status = record.status;
            for reminder in record.reminders {
                task.push_reminder(reminder);
            }

            store.restore_task(task, record.id.map(TaskId));
        }

        store
    }
}

/// Serialize a store to pretty-printed JSON
pub fn encode(store: &TaskStore) -> Result<String> {
    let document = TrackerDocument::from_store(store);
    serde_json::to_string_pretty(&document).context("Failed to serialize task data")
}

/// Parse JSON into a fresh store
///
/// The whole document is parsed before any entity is created, so a malformed
/// file yields an error and never a half-built store.
pub fn decode(content: &str) -> Result<TaskStore> {
    let document: TrackerDocument =
        serde_json::from_str(content).context("Failed to parse task data")?;
    Ok(document.into_store())
}

/// File-backed storage for the whole store
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the store; a missing file gives an empty store
    pub fn load(&self) -> Result<TaskStore> {
        if !self.file_path.exists() {
            info!(
                "No data file at {}, starting empty",
                self.file_path.display()
            );
            return Ok(TaskStore::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let store = decode(&content)
            .with_context(|| format!("Failed to load {}", self.file_path.display()))?;
        info!(
            "Loaded {} task(s), {} category(ies), {} priority level(s) from {}",
            store.tasks().len(),
            store.categories().len(),
            store.priorities().len(),
            self.file_path.display()
        );
        Ok(store)
    }

    /// Load the store, falling back to an empty one on any failure
    pub fn load_or_default(&self) -> TaskStore {
        self.load().unwrap_or_else(|e| {
            warn!("{:#}; starting with an empty store", e);
            TaskStore::new()
        })
    }

    /// Write the whole store, creating the parent directory if needed
    pub fn save(&self, store: &TaskStore) -> Result<()> {
        let content = encode(store)?;
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        info!(
            "Saved {} task(s) to {}",
            store.tasks().len(),
            self.file_path.display()
        );
        Ok(())
    }
}
