//! Error types for the task store.
//!
//! Every store mutation checks its rules before touching any collection, so
//! an `Err` always means nothing was changed.

use chrono::NaiveDate;
use thiserror::Error;

use crate::tracker::{CategoryId, PriorityId, TaskId};

pub type StoreResult<T> = Result<T, StoreError>;

/// Broad class of a rejected operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request broke a store rule
    Validation,
    /// The request named something that is not in the store
    NotFound,
}

/// A rejected store operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Priority '{0}' already exists")]
    DuplicatePriority(String),

    #[error("A reminder with message '{0}' already exists")]
    DuplicateReminder(String),

    #[error("Reminder date {date} is after the task deadline {deadline}")]
    ReminderAfterDeadline { date: NaiveDate, deadline: NaiveDate },

    #[error("Relative reminders require the task to have a deadline")]
    MissingDeadline,

    #[error("Reminder date is out of the supported calendar range")]
    ReminderDateOutOfRange,

    #[error("The Default priority cannot be deleted or renamed")]
    DefaultPriorityProtected,

    #[error("Task {0} is completed; its reminders cannot be changed")]
    TaskCompleted(TaskId),

    #[error("Task {0} does not exist")]
    TaskNotFound(TaskId),

    #[error("Category does not exist")]
    CategoryNotFound(CategoryId),

    #[error("Priority does not exist")]
    PriorityNotFound(PriorityId),

    #[error("Task {task} has no reminder with message '{message}'")]
    ReminderNotFound { task: TaskId, message: String },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::TaskNotFound(_)
            | StoreError::CategoryNotFound(_)
            | StoreError::PriorityNotFound(_)
            | StoreError::ReminderNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(StoreError::MissingDeadline.kind(), ErrorKind::Validation);
        assert_eq!(StoreError::DefaultPriorityProtected.kind(), ErrorKind::Validation);
        assert!(StoreError::TaskNotFound(TaskId(3)).is_not_found());
        assert!(
            StoreError::ReminderNotFound {
                task: TaskId(1),
                message: "call".to_string()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::EmptyField { field: "Title" }.to_string(),
            "Title cannot be empty"
        );
        assert_eq!(
            StoreError::TaskNotFound(TaskId(4)).to_string(),
            "Task #4 does not exist"
        );
    }
}
