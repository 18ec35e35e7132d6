//! Task tracker domain models and business logic
//!
//! This module contains the entity store and its rules.
//! It is split into submodules for better organization:
//! - `models`: Tasks, categories, priority levels, reminders
//! - `task_store`: The store and its task/category/priority mutations
//! - `reminders`: Reminder mutations and their store-wide rules
//! - `queries`: Search, summary and preview queries

mod models;
mod queries;
mod reminders;
mod task_store;

// Re-export all public types
pub use models::{
    Category, CategoryId, DEFAULT_PRIORITY_TITLE, PriorityId, PriorityLevel, Reminder,
    ReminderKind, Task, TaskId, TaskStatus, local_date_today,
};
pub use queries::{DUE_SOON_DAYS, SearchCriteria, TaskSummary};
pub use task_store::{TaskEdit, TaskStore};
