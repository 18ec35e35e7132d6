//! Validation helper functions for the command-line front end
//!
//! This module turns raw user input into store types: statuses, dates,
//! task IDs, reminder kinds, and category/priority titles.

use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;

use crate::tracker::{CategoryId, PriorityId, ReminderKind, TaskId, TaskStatus, TaskStore};

/// Parse a status label such as "In Progress"
pub fn parse_status(status_str: &str) -> Result<TaskStatus> {
    status_str.parse::<TaskStatus>().map_err(|e| anyhow!(e))
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        anyhow!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        )
    })
}

/// Parse an optional date where an empty string means "clear"
pub fn parse_optional_date(date_str: &str) -> Result<Option<NaiveDate>> {
    if date_str.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(date_str).map(Some)
    }
}

/// Parse a task ID such as "#3" or "3"
pub fn parse_task_id(id_str: &str) -> Result<TaskId> {
    id_str.parse::<TaskId>().map_err(|e| anyhow!(e))
}

/// Build a reminder kind from `--before` / `--on` style input
///
/// Exactly one of the two must be given.
pub fn parse_reminder_kind(before: Option<&str>, on: Option<&str>) -> Result<ReminderKind> {
    match (before, on) {
        (Some(kind), None) => kind.parse::<ReminderKind>().map_err(|e| anyhow!(e)),
        (None, Some(date)) => Ok(ReminderKind::OnDate(parse_date(date)?)),
        (Some(_), Some(_)) => bail!("Use either a relative reminder or an explicit date, not both"),
        (None, None) => bail!("A reminder needs a relative kind (day, week, month) or a date"),
    }
}

/// Format an error message for an unknown category with the available titles
pub fn format_invalid_category_error(title: &str, store: &TaskStore) -> String {
    let categories = store.categories();
    if categories.is_empty() {
        format!(
            "Category '{}' does not exist. No categories have been created yet. Create one first with add-category.",
            title
        )
    } else {
        let titles: Vec<&str> = categories.iter().map(|c| c.title()).collect();
        format!(
            "Category '{}' does not exist.\nAvailable categories: {}",
            title,
            titles.join(", ")
        )
    }
}

/// Format an error message for an unknown priority with the available titles
pub fn format_invalid_priority_error(title: &str, store: &TaskStore) -> String {
    let titles: Vec<&str> = store.priorities().iter().map(|p| p.title()).collect();
    format!(
        "Priority '{}' does not exist.\nAvailable priorities: {}",
        title,
        titles.join(", ")
    )
}

/// Resolve a category title to its handle
pub fn resolve_category(store: &TaskStore, title: &str) -> Result<CategoryId> {
    store
        .find_category_by_title(title)
        .map(|c| c.id())
        .ok_or_else(|| anyhow!(format_invalid_category_error(title, store)))
}

/// Resolve a priority title to its handle
pub fn resolve_priority(store: &TaskStore, title: &str) -> Result<PriorityId> {
    store
        .find_priority_by_title(title)
        .map(|p| p.id())
        .ok_or_else(|| anyhow!(format_invalid_priority_error(title, store)))
}

/// Resolve an optional category where an empty string means "none"
pub fn resolve_optional_category(store: &TaskStore, title: &str) -> Result<Option<CategoryId>> {
    if title.is_empty() {
        Ok(None)
    } else {
        resolve_category(store, title).map(Some)
    }
}

/// Resolve an optional priority where an empty string means "none"
pub fn resolve_optional_priority(store: &TaskStore, title: &str) -> Result<Option<PriorityId>> {
    if title.is_empty() {
        Ok(None)
    } else {
        resolve_priority(store, title).map(Some)
    }
}
