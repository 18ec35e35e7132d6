//! Task handlers

use anyhow::{Result, bail};

use crate::TaskTracker;
use crate::tracker::{PriorityId, Task, TaskEdit};
use crate::validation;

impl TaskTracker {
    /// Create a task. Priority defaults to "Default" and status to Open.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_add_task(
        &mut self,
        title: String,
        description: Option<String>,
        category: Option<String>,
        priority: Option<String>,
        deadline: Option<String>,
        status: Option<String>,
    ) -> Result<String> {
        let mut task = Task::new(title);

        if let Some(d) = description {
            task.description = if d.is_empty() { None } else { Some(d) };
        }
        if let Some(title) = category {
            task.category = validation::resolve_optional_category(&self.store, &title)?;
        }
        task.priority = match priority {
            Some(title) => validation::resolve_optional_priority(&self.store, &title)?,
            None => Some(PriorityId::DEFAULT),
        };
        if let Some(date_str) = deadline {
            task.deadline = validation::parse_optional_date(&date_str)?;
        }
        if let Some(status_str) = status {
            task.status = validation::parse_status(&status_str)?;
        }

        let id = self.store.add_task(task)?;
        self.mark_dirty();
        Ok(format!("Task created with ID: {}", id))
    }

    /// Edit a task's fields. An empty string clears an optional field.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_update_task(
        &mut self,
        id: String,
        title: Option<String>,
        description: Option<String>,
        category: Option<String>,
        priority: Option<String>,
        deadline: Option<String>,
    ) -> Result<String> {
        let id = validation::parse_task_id(&id)?;

        let mut edit = TaskEdit {
            title,
            description: description.map(|d| if d.is_empty() { None } else { Some(d) }),
            ..Default::default()
        };
        if let Some(title) = category {
            edit.category = Some(validation::resolve_optional_category(&self.store, &title)?);
        }
        if let Some(title) = priority {
            edit.priority = Some(validation::resolve_optional_priority(&self.store, &title)?);
        }
        if let Some(date_str) = deadline {
            edit.deadline = Some(validation::parse_optional_date(&date_str)?);
        }

        self.store.update_task(id, edit)?;
        self.mark_dirty();
        Ok(format!("Task {} updated successfully", id))
    }

    pub fn handle_delete_task(&mut self, id: String) -> Result<String> {
        let id = validation::parse_task_id(&id)?;
        let task = self.store.delete_task(id)?;
        self.mark_dirty();

        let reminders = task.reminders().len();
        if reminders == 0 {
            Ok(format!("Deleted task {} '{}'", id, task.title))
        } else {
            Ok(format!(
                "Deleted task {} '{}' and its {} reminder(s)",
                id, task.title, reminders
            ))
        }
    }

    /// Change a task's status
    ///
    /// Completing a task with reminders deletes them, so that transition is
    /// refused unless `confirmed` is set.
    pub fn handle_change_status(
        &mut self,
        id: String,
        status: String,
        confirmed: bool,
    ) -> Result<String> {
        let id = validation::parse_task_id(&id)?;
        let new_status = validation::parse_status(&status)?;

        let affected = self.store.preview_status_change(id, new_status)?;
        if !affected.is_empty() && !confirmed {
            let mut message = format!(
                "Completing task {} will delete {} reminder(s):\n",
                id,
                affected.len()
            );
            for reminder in affected {
                message.push_str(&format!("- {}\n", reminder));
            }
            message.push_str("Run again with --yes to confirm.");
            bail!(message);
        }

        let cleared = self.store.change_status(id, new_status)?;
        self.mark_dirty();

        if cleared.is_empty() {
            Ok(format!("Task {} status changed to {}", id, new_status))
        } else {
            Ok(format!(
                "Task {} status changed to {} ({} reminder(s) deleted)",
                id,
                new_status,
                cleared.len()
            ))
        }
    }
}
