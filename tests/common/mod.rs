//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use task_tracker::{Storage, TaskStore, TaskTracker};
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a test tracker whose data file lives in a fresh temporary directory
///
/// The directory is returned so it outlives the tracker.
pub fn get_test_tracker() -> (TaskTracker, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    let tracker = TaskTracker::new(&path).unwrap();
    (tracker, dir)
}

/// Storage pointing at a not-yet-existing file in a temporary directory
pub fn get_test_storage() -> (Storage, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("tasks.json"));
    (storage, dir)
}

/// Extract task ID from add-task response message
/// Response format: "Task created with ID: #<n>"
pub fn extract_id_from_response(response: &str) -> String {
    response
        .rsplit("ID: ")
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Titles of all tasks in store order
pub fn task_titles(store: &TaskStore) -> Vec<String> {
    store.tasks().iter().map(|t| t.title.clone()).collect()
}
