//! Reminder operations for TaskStore
//!
//! Reminders belong to exactly one task, but their messages are unique across
//! the whole store, so every mutation is checked here against all tasks
//! before anything changes.

use log::debug;

use crate::error::{StoreError, StoreResult};
use crate::tracker::models::{Reminder, ReminderKind, Task, TaskId};
use crate::tracker::task_store::TaskStore;

impl TaskStore {
    /// Check whether any reminder in the store uses this message
    ///
    /// `except` names one reminder (by owner and message) to ignore, so an
    /// update may keep its own message.
    pub fn reminder_message_taken(&self, message: &str, except: Option<(TaskId, &str)>) -> bool {
        self.tasks.iter().any(|task| {
            task.reminders.iter().any(|r| {
                r.message == message && except != Some((task.id, r.message.as_str()))
            })
        })
    }

    /// Run the rules shared by add and update, returning the resolved reminder
    fn validate_reminder(
        &self,
        task: &Task,
        kind: ReminderKind,
        message: &str,
        except: Option<&str>,
    ) -> StoreResult<Reminder> {
        if task.is_completed() {
            return Err(StoreError::TaskCompleted(task.id));
        }
        if message.trim().is_empty() {
            return Err(StoreError::EmptyField {
                field: "Reminder message",
            });
        }
        if self.reminder_message_taken(message, except.map(|m| (task.id, m))) {
            return Err(StoreError::DuplicateReminder(message.to_string()));
        }

        let date = kind.resolve(task.deadline)?;
        if let Some(deadline) = task.deadline {
            if date > deadline {
                return Err(StoreError::ReminderAfterDeadline { date, deadline });
            }
        }
        Ok(Reminder::new(date, message))
    }

    /// Add a reminder to a task
    pub fn add_reminder(
        &mut self,
        task_id: TaskId,
        kind: ReminderKind,
        message: impl Into<String>,
    ) -> StoreResult<Reminder> {
        let message = message.into();
        let task = self.task(task_id).ok_or(StoreError::TaskNotFound(task_id))?;
        let reminder = self.validate_reminder(task, kind, &message, None)?;

        debug!("add reminder to task {}: {}", task_id, reminder);
        self.task_mut(task_id)?.reminders.push(reminder.clone());
        Ok(reminder)
    }

    /// Remove a task's reminder by message
    pub fn delete_reminder(&mut self, task_id: TaskId, message: &str) -> StoreResult<Reminder> {
        let task = self.task_mut(task_id)?;
        if task.is_completed() {
            return Err(StoreError::TaskCompleted(task_id));
        }
        let pos = task
            .reminders
            .iter()
            .position(|r| r.message == message)
            .ok_or_else(|| StoreError::ReminderNotFound {
                task: task_id,
                message: message.to_string(),
            })?;

        let removed = task.reminders.remove(pos);
        debug!("delete reminder from task {}: {}", task_id, removed);
        Ok(removed)
    }

    /// Replace one of a task's reminders, keeping its position
    ///
    /// The new values go through the same checks as `add_reminder`; the
    /// reminder being replaced does not count as a duplicate of itself.
    pub fn update_reminder(
        &mut self,
        task_id: TaskId,
        old_message: &str,
        kind: ReminderKind,
        message: impl Into<String>,
    ) -> StoreResult<Reminder> {
        let message = message.into();
        let task = self.task(task_id).ok_or(StoreError::TaskNotFound(task_id))?;
        if task.is_completed() {
            return Err(StoreError::TaskCompleted(task_id));
        }
        let pos = task
            .reminders
            .iter()
            .position(|r| r.message == old_message)
            .ok_or_else(|| StoreError::ReminderNotFound {
                task: task_id,
                message: old_message.to_string(),
            })?;
        let reminder = self.validate_reminder(task, kind, &message, Some(old_message))?;

        debug!(
            "update reminder of task {}: '{}' -> {}",
            task_id, old_message, reminder
        );
        self.task_mut(task_id)?.reminders[pos] = reminder.clone();
        Ok(reminder)
    }
}
