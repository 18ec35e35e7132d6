//! Formatting helper functions for the command-line front end
//!
//! This module contains the text shown for tasks, reminders and the summary.

use crate::tracker::{
    Category, DUE_SOON_DAYS, PriorityLevel, Reminder, Task, TaskStore, TaskSummary,
};

/// Format one task as a block of labelled lines
///
/// Unset fields show a "No ..." placeholder.
pub fn format_task(task: &Task, store: &TaskStore) -> String {
    let category = store
        .category_of(task)
        .map(|c| c.title().to_string())
        .unwrap_or_else(|| "No Category".to_string());
    let priority = store
        .priority_of(task)
        .map(|p| p.title().to_string())
        .unwrap_or_else(|| "No Priority".to_string());
    let deadline = task
        .deadline
        .map(|d| d.to_string())
        .unwrap_or_else(|| "No Deadline".to_string());
    let description = match task.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => "No Description".to_string(),
    };
    let reminders = if task.reminders().is_empty() {
        "No Reminders".to_string()
    } else {
        task.reminders()
            .iter()
            .map(Reminder::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "[{}] {}\n  Status: {}\n  Category: {}\n  Priority: {}\n  Deadline: {}\n  Description: {}\n  Reminders: {}\n",
        task.id(),
        task.title,
        task.status,
        category,
        priority,
        deadline,
        description,
        reminders
    )
}

/// Format a list of tasks into a display string
pub fn format_tasks(tasks: &[&Task], store: &TaskStore) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&format_task(task, store));
    }
    result
}

pub fn format_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories".to_string();
    }
    categories
        .iter()
        .map(|c| format!("- {}\n", c.title()))
        .collect()
}

pub fn format_priorities(priorities: &[PriorityLevel]) -> String {
    priorities
        .iter()
        .map(|p| format!("- {}\n", p.title()))
        .collect()
}

/// Format every reminder with the task it belongs to
pub fn format_reminders(store: &TaskStore) -> String {
    let reminders = store.reminders_with_owner();
    if reminders.is_empty() {
        return "No reminders".to_string();
    }

    let mut result = format!("Found {} reminder(s):\n\n", reminders.len());
    for (task, reminder) in reminders {
        result.push_str(&format!("- {} ({} {})\n", reminder, task.id(), task.title));
    }
    result
}

pub fn format_summary(summary: &TaskSummary) -> String {
    format!(
        "Total tasks: {}\nCompleted: {}\nDelayed: {}\nDue within {} days: {}",
        summary.total, summary.completed, summary.delayed, DUE_SOON_DAYS, summary.due_soon
    )
}
