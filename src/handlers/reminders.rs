//! Reminder handlers

use anyhow::Result;
use chrono::NaiveDate;

use crate::TaskTracker;
use crate::error::{StoreError, StoreResult};
use crate::tracker::{ReminderKind, TaskId};
use crate::validation;

impl TaskTracker {
    /// Add a reminder, either relative to the deadline (`before`) or on a date
    pub fn handle_add_reminder(
        &mut self,
        task_id: String,
        message: String,
        before: Option<String>,
        on: Option<String>,
    ) -> Result<String> {
        let task_id = validation::parse_task_id(&task_id)?;
        let kind = validation::parse_reminder_kind(before.as_deref(), on.as_deref())?;

        let reminder = self.store.add_reminder(task_id, kind, message)?;
        self.mark_dirty();
        Ok(format!("Reminder added to task {}: {}", task_id, reminder))
    }

    /// Change a reminder's message and/or date
    ///
    /// Without `before` or `on` the reminder keeps its current date; without
    /// `message` it keeps its current message.
    pub fn handle_update_reminder(
        &mut self,
        task_id: String,
        old_message: String,
        message: Option<String>,
        before: Option<String>,
        on: Option<String>,
    ) -> Result<String> {
        let task_id = validation::parse_task_id(&task_id)?;
        let kind = if before.is_none() && on.is_none() {
            ReminderKind::OnDate(self.current_reminder_date(task_id, &old_message)?)
        } else {
            validation::parse_reminder_kind(before.as_deref(), on.as_deref())?
        };
        let message = message.unwrap_or_else(|| old_message.clone());

        let reminder = self
            .store
            .update_reminder(task_id, &old_message, kind, message)?;
        self.mark_dirty();
        Ok(format!("Reminder of task {} updated: {}", task_id, reminder))
    }

    pub fn handle_delete_reminder(&mut self, task_id: String, message: String) -> Result<String> {
        let task_id = validation::parse_task_id(&task_id)?;
        let removed = self.store.delete_reminder(task_id, &message)?;
        self.mark_dirty();
        Ok(format!("Reminder deleted from task {}: {}", task_id, removed))
    }

    pub fn handle_list_reminders(&self) -> Result<String> {
        Ok(crate::formatting::format_reminders(&self.store))
    }

    fn current_reminder_date(&self, task_id: TaskId, message: &str) -> StoreResult<NaiveDate> {
        let task = self
            .store
            .task(task_id)
            .ok_or(StoreError::TaskNotFound(task_id))?;
        if task.is_completed() {
            return Err(StoreError::TaskCompleted(task_id));
        }
        task.reminders()
            .iter()
            .find(|r| r.message == message)
            .map(|r| r.date)
            .ok_or_else(|| StoreError::ReminderNotFound {
                task: task_id,
                message: message.to_string(),
            })
    }
}
