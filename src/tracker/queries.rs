//! Read-only queries over TaskStore
//!
//! Search, summary statistics, the flattened reminder view, and the
//! previews a caller can show before committing a destructive change.
//! Nothing here mutates the store.

use chrono::{Days, NaiveDate};

use crate::error::{StoreError, StoreResult};
use crate::tracker::models::{
    CategoryId, PriorityId, Reminder, Task, TaskId, TaskStatus, local_date_today,
};
use crate::tracker::task_store::TaskStore;

/// Days in the "due soon" window, counting today
pub const DUE_SOON_DAYS: u64 = 7;

/// Search criteria; an absent criterion matches every task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    pub category: Option<CategoryId>,
    pub priority: Option<PriorityId>,
}

impl SearchCriteria {
    pub fn matches(&self, task: &Task) -> bool {
        let title_matches = self.title.as_ref().is_none_or(|needle| {
            task.title.to_lowercase().contains(&needle.to_lowercase())
        });
        let category_matches = self.category.is_none_or(|c| task.category == Some(c));
        let priority_matches = self.priority.is_none_or(|p| task.priority == Some(p));

        title_matches && category_matches && priority_matches
    }
}

/// Counts shown in the summary panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub delayed: usize,
    /// Deadline within [today, today + 7 days)
    pub due_soon: usize,
}

impl TaskStore {
    /// Count all tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Every reminder, in task order then per-task insertion order
    pub fn reminders(&self) -> Vec<&Reminder> {
        self.tasks.iter().flat_map(|t| t.reminders.iter()).collect()
    }

    /// Every reminder together with the task that owns it
    pub fn reminders_with_owner(&self) -> Vec<(&Task, &Reminder)> {
        self.tasks
            .iter()
            .flat_map(|t| t.reminders.iter().map(move |r| (t, r)))
            .collect()
    }

    /// Tasks matching all given criteria, in store order
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&Task> {
        self.tasks.iter().filter(|t| criteria.matches(t)).collect()
    }

    /// Summary counts relative to the given day
    pub fn summary_on(&self, today: NaiveDate) -> TaskSummary {
        let window_end = today.checked_add_days(Days::new(DUE_SOON_DAYS));
        let due_soon = |task: &&Task| match (task.deadline, window_end) {
            (Some(deadline), Some(end)) => deadline >= today && deadline < end,
            (Some(deadline), None) => deadline >= today,
            (None, _) => false,
        };

        TaskSummary {
            total: self.tasks.len(),
            completed: self.count_with_status(TaskStatus::Completed),
            delayed: self.count_with_status(TaskStatus::Delayed),
            due_soon: self.tasks.iter().filter(due_soon).count(),
        }
    }

    /// Summary counts relative to the local date
    pub fn summary(&self) -> TaskSummary {
        self.summary_on(local_date_today())
    }

    fn count_with_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    /// Reminders that `change_status(id, status)` would clear
    ///
    /// Empty unless the new status is Completed and the task has reminders.
    pub fn preview_status_change(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> StoreResult<Vec<&Reminder>> {
        let task = self.task(id).ok_or(StoreError::TaskNotFound(id))?;
        if status != TaskStatus::Completed {
            return Ok(Vec::new());
        }
        Ok(task.reminders.iter().collect())
    }

    /// Tasks that `delete_category(id)` would remove
    pub fn preview_delete_category(&self, id: CategoryId) -> StoreResult<Vec<&Task>> {
        self.category(id).ok_or(StoreError::CategoryNotFound(id))?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.category == Some(id))
            .collect())
    }

    /// Tasks that `delete_priority(id)` would move to "Default"
    pub fn preview_delete_priority(&self, id: PriorityId) -> StoreResult<Vec<&Task>> {
        if id.is_default() {
            return Err(StoreError::DefaultPriorityProtected);
        }
        self.priority(id).ok_or(StoreError::PriorityNotFound(id))?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.priority == Some(id))
            .collect())
    }
}
