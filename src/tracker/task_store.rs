use chrono::NaiveDate;
use log::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::tracker::models::{
    Category, CategoryId, DEFAULT_PRIORITY_TITLE, PriorityId, PriorityLevel, Reminder, Task,
    TaskId, TaskStatus,
};

/// The entity store: tasks, categories and priority levels
///
/// All three collections are `Vec`s so display and serialization order is
/// insertion order. Tasks refer to categories and priorities through
/// store-assigned handles; titles are resolved through the store, so a
/// rename is a single write to the owning collection.
///
/// Reminders are not stored separately. They live inside their task and the
/// flattened view is computed on demand (see `queries.rs`).
#[derive(Debug, Clone)]
pub struct TaskStore {
    pub(crate) tasks: Vec<Task>,
    pub(crate) categories: Vec<Category>,
    /// Always starts with the "Default" priority under `PriorityId::DEFAULT`
    pub(crate) priorities: Vec<PriorityLevel>,

    task_counter: u32,
    category_counter: u32,
    priority_counter: u32,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            categories: Vec::new(),
            priorities: vec![PriorityLevel {
                id: PriorityId::DEFAULT,
                title: DEFAULT_PRIORITY_TITLE.to_string(),
            }],
            task_counter: 0,
            category_counter: 0,
            priority_counter: 0,
        }
    }
}

/// Field changes for `TaskStore::update_task`
///
/// `None` leaves a field alone. For optional fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<CategoryId>>,
    pub priority: Option<Option<PriorityId>>,
    pub deadline: Option<Option<NaiveDate>>,
}

fn require_title(title: &str, field: &'static str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::EmptyField { field });
    }
    Ok(())
}

impl TaskStore {
    /// Create a store holding only the "Default" priority
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_task_id(&mut self) -> TaskId {
        self.task_counter += 1;
        TaskId(self.task_counter)
    }

    fn generate_category_id(&mut self) -> CategoryId {
        self.category_counter += 1;
        CategoryId(self.category_counter)
    }

    fn generate_priority_id(&mut self) -> PriorityId {
        self.priority_counter += 1;
        PriorityId(self.priority_counter)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn priorities(&self) -> &[PriorityLevel] {
        &self.priorities
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn priority(&self, id: PriorityId) -> Option<&PriorityLevel> {
        self.priorities.iter().find(|p| p.id == id)
    }

    /// The category a task refers to, if any
    pub fn category_of(&self, task: &Task) -> Option<&Category> {
        task.category.and_then(|id| self.category(id))
    }

    /// The priority level a task refers to, if any
    pub fn priority_of(&self, task: &Task) -> Option<&PriorityLevel> {
        task.priority.and_then(|id| self.priority(id))
    }

    /// The "Default" priority level
    pub fn default_priority(&self) -> &PriorityLevel {
        &self.priorities[0]
    }

    fn check_references(
        &self,
        category: Option<CategoryId>,
        priority: Option<PriorityId>,
    ) -> StoreResult<()> {
        if let Some(id) = category {
            self.category(id).ok_or(StoreError::CategoryNotFound(id))?;
        }
        if let Some(id) = priority {
            self.priority(id).ok_or(StoreError::PriorityNotFound(id))?;
        }
        Ok(())
    }

    // Tasks

    /// Append a task and return the handle assigned to it
    ///
    /// Tasks are not deduplicated. The title must not be empty and any
    /// category/priority handle must exist in this store.
    pub fn add_task(&mut self, mut task: Task) -> StoreResult<TaskId> {
        require_title(&task.title, "Task title")?;
        self.check_references(task.category, task.priority)?;

        let id = self.generate_task_id();
        task.id = id;
        debug!("add task {} '{}'", id, task.title);
        self.tasks.push(task);
        Ok(id)
    }

    /// Remove a task together with its reminders
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        debug!("delete task {}", id);
        Ok(self.tasks.remove(pos))
    }

    /// Edit the plain fields of a task
    ///
    /// Status changes go through `change_status` and reminders through the
    /// reminder operations. A new deadline may not fall before any of the
    /// task's existing reminders.
    pub fn update_task(&mut self, id: TaskId, edit: TaskEdit) -> StoreResult<()> {
        let task = self.task(id).ok_or(StoreError::TaskNotFound(id))?;

        if let Some(title) = &edit.title {
            require_title(title, "Task title")?;
        }
        let category = edit.category.unwrap_or(task.category);
        let priority = edit.priority.unwrap_or(task.priority);
        self.check_references(category, priority)?;

        let deadline = edit.deadline.unwrap_or(task.deadline);
        if let (Some(reminder), Some(deadline)) = (task.reminder_after(deadline), deadline) {
            return Err(StoreError::ReminderAfterDeadline {
                date: reminder.date,
                deadline,
            });
        }

        let task = self.task_mut(id)?;
        if let Some(title) = edit.title {
            task.title = title;
        }
        if let Some(description) = edit.description {
            task.description = description;
        }
        task.category = category;
        task.priority = priority;
        task.deadline = deadline;
        debug!("update task {}", id);
        Ok(())
    }

    /// Set a task's status
    ///
    /// Moving to Completed clears the task's reminders; they are returned so
    /// the caller can report them. Callers that need consent first should ask
    /// `preview_status_change` before committing.
    pub fn change_status(
        &mut self,
        id: TaskId,
        status: TaskStatus,
    ) -> StoreResult<Vec<Reminder>> {
        let task = self.task_mut(id)?;
        task.status = status;
        let cleared = if status == TaskStatus::Completed {
            std::mem::take(&mut task.reminders)
        } else {
            Vec::new()
        };
        debug!(
            "task {} status -> {} ({} reminder(s) cleared)",
            id,
            status,
            cleared.len()
        );
        Ok(cleared)
    }

    // Categories

    /// Add a category, or return the existing one with the same title
    pub fn add_category(&mut self, title: impl Into<String>) -> StoreResult<CategoryId> {
        let title = title.into();
        require_title(&title, "Category title")?;

        if let Some(existing) = self.find_category_by_title(&title) {
            return Ok(existing.id);
        }

        let id = self.generate_category_id();
        debug!("add category '{}'", title);
        self.categories.push(Category { id, title });
        Ok(id)
    }

    /// Delete a category and every task filed under it
    ///
    /// Returns the removed tasks in their former order.
    pub fn delete_category(&mut self, id: CategoryId) -> StoreResult<Vec<Task>> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::CategoryNotFound(id))?;
        let category = self.categories.remove(pos);

        let (removed, kept): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.category == Some(id));
        self.tasks = kept;

        debug!(
            "delete category '{}' ({} task(s) removed)",
            category.title,
            removed.len()
        );
        Ok(removed)
    }

    /// Rename a category in place
    ///
    /// The handle stays the same, so every task filed under it sees the new
    /// title.
    pub fn update_category(
        &mut self,
        id: CategoryId,
        title: impl Into<String>,
    ) -> StoreResult<()> {
        let title = title.into();
        require_title(&title, "Category title")?;
        if self
            .categories
            .iter()
            .any(|c| c.id != id && c.title == title)
        {
            return Err(StoreError::DuplicateCategory(title));
        }

        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::CategoryNotFound(id))?;
        debug!("rename category '{}' -> '{}'", category.title, title);
        category.title = title;
        Ok(())
    }

    /// Find a category by exact title
    pub fn find_category_by_title(&self, title: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.title == title)
    }

    // Priorities

    /// Add a priority level, or return the existing one with the same title
    pub fn add_priority(&mut self, title: impl Into<String>) -> StoreResult<PriorityId> {
        let title = title.into();
        require_title(&title, "Priority title")?;

        if let Some(existing) = self.find_priority_by_title(&title) {
            return Ok(existing.id);
        }

        let id = self.generate_priority_id();
        debug!("add priority '{}'", title);
        self.priorities.push(PriorityLevel { id, title });
        Ok(id)
    }

    /// Delete a priority level, moving its tasks to "Default"
    ///
    /// Returns the tasks that were re-pointed. The "Default" priority itself
    /// is rejected.
    pub fn delete_priority(&mut self, id: PriorityId) -> StoreResult<Vec<TaskId>> {
        if id.is_default() {
            return Err(StoreError::DefaultPriorityProtected);
        }
        let pos = self
            .priorities
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::PriorityNotFound(id))?;

        let moved = self.repoint_priority(id, PriorityId::DEFAULT);
        let priority = self.priorities.remove(pos);
        debug!(
            "delete priority '{}' ({} task(s) moved to {})",
            priority.title,
            moved.len(),
            DEFAULT_PRIORITY_TITLE
        );
        Ok(moved)
    }

    /// Replace a priority level with a new one carrying the given title
    ///
    /// Unlike categories this re-links: the replacement gets a fresh handle
    /// at the same position and every referencing task is moved to it.
    /// Returns the new handle. The "Default" priority is rejected.
    pub fn update_priority(
        &mut self,
        id: PriorityId,
        title: impl Into<String>,
    ) -> StoreResult<PriorityId> {
        if id.is_default() {
            return Err(StoreError::DefaultPriorityProtected);
        }
        let title = title.into();
        require_title(&title, "Priority title")?;
        let pos = self
            .priorities
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::PriorityNotFound(id))?;
        if self
            .priorities
            .iter()
            .any(|p| p.id != id && p.title == title)
        {
            return Err(StoreError::DuplicatePriority(title));
        }

        let new_id = self.generate_priority_id();
        let moved = self.repoint_priority(id, new_id);
        debug!(
            "replace priority '{}' with '{}' ({} task(s) re-linked)",
            self.priorities[pos].title,
            title,
            moved.len()
        );
        self.priorities[pos] = PriorityLevel { id: new_id, title };
        Ok(new_id)
    }

    fn repoint_priority(&mut self, from: PriorityId, to: PriorityId) -> Vec<TaskId> {
        let mut moved = Vec::new();
        for task in self.tasks.iter_mut() {
            if task.priority == Some(from) {
                task.priority = Some(to);
                moved.push(task.id);
            }
        }
        moved
    }

    /// Find a priority level by exact title
    pub fn find_priority_by_title(&self, title: &str) -> Option<&PriorityLevel> {
        self.priorities.iter().find(|p| p.title == title)
    }

    // Restoring stored data

    /// Put back a category read from storage; stored titles are not checked
    pub(crate) fn restore_category(&mut self, title: String) -> CategoryId {
        if let Some(existing) = self.find_category_by_title(&title) {
            return existing.id;
        }
        let id = self.generate_category_id();
        self.categories.push(Category { id, title });
        id
    }

    /// Put back a priority level read from storage; stored titles are not checked
    pub(crate) fn restore_priority(&mut self, title: String) -> PriorityId {
        if let Some(existing) = self.find_priority_by_title(&title) {
            return existing.id;
        }
        let id = self.generate_priority_id();
        self.priorities.push(PriorityLevel { id, title });
        id
    }

    /// Make sure freshly issued task handles start above `max`
    pub(crate) fn reserve_task_ids(&mut self, max: u32) {
        self.task_counter = self.task_counter.max(max);
    }

    /// Put back a task read from storage
    ///
    /// The stored handle is kept unless it is missing or already taken, in
    /// which case a fresh one is issued. The title is not checked and the
    /// category/priority handles must come from this store.
    pub(crate) fn restore_task(&mut self, mut task: Task, stored: Option<TaskId>) -> TaskId {
        let id = match stored {
            Some(id) if id != TaskId::UNASSIGNED && self.task(id).is_none() => id,
            _ => self.generate_task_id(),
        };
        if let Some(stored) = stored {
            if stored != id {
                warn!("Stored task ID {} is already in use, re-issued as {}", stored, id);
            }
        }
        task.id = id;
        self.tasks.push(task);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_store_has_only_default_priority() {
        let store = TaskStore::new();
        assert!(store.tasks().is_empty());
        assert!(store.categories().is_empty());
        assert_eq!(store.priorities().len(), 1);
        assert_eq!(store.priorities()[0].title(), DEFAULT_PRIORITY_TITLE);
        assert!(store.priorities()[0].is_default());
    }

    #[test]
    fn test_task_ids_increase_from_one() {
        let mut store = TaskStore::new();
        let first = store.add_task(Task::new("First")).unwrap();
        let second = store.add_task(Task::new("Second")).unwrap();
        assert_eq!(first, TaskId(1));
        assert_eq!(second, TaskId(2));
        assert_eq!(store.task(second).unwrap().title, "Second");
    }

    #[test]
    fn test_add_task_rejects_dangling_category() {
        let mut store = TaskStore::new();
        let result = store.add_task(Task::new("Orphan").with_category(CategoryId(42)));
        assert_eq!(result, Err(StoreError::CategoryNotFound(CategoryId(42))));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_category_handle_survives_rename() {
        let mut store = TaskStore::new();
        let home = store.add_category("Home").unwrap();
        store.update_category(home, "House").unwrap();
        assert_eq!(store.category(home).unwrap().title(), "House");
        assert!(store.find_category_by_title("Home").is_none());
    }

    #[test]
    fn test_priority_handle_changes_on_update() {
        let mut store = TaskStore::new();
        let high = store.add_priority("High").unwrap();
        let urgent = store.update_priority(high, "Urgent").unwrap();
        assert_ne!(high, urgent);
        assert!(store.priority(high).is_none());
        assert_eq!(store.priorities()[1].id(), urgent);
    }

    #[test]
    fn test_update_task_rejects_deadline_before_reminder() {
        let mut store = TaskStore::new();
        let id = store
            .add_task(Task::new("Report").with_deadline(date(2025, 6, 10)))
            .unwrap();
        store
            .task_mut(id)
            .unwrap()
            .push_reminder(Reminder::new(date(2025, 6, 9), "draft"));

        let edit = TaskEdit {
            deadline: Some(Some(date(2025, 6, 8))),
            ..Default::default()
        };
        assert!(matches!(
            store.update_task(id, edit),
            Err(StoreError::ReminderAfterDeadline { .. })
        ));
        assert_eq!(store.task(id).unwrap().deadline, Some(date(2025, 6, 10)));
    }
}
