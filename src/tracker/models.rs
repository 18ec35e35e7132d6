use chrono::{Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};

/// Title of the priority level that always exists and can never be removed
pub const DEFAULT_PRIORITY_TITLE: &str = "Default";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Store-assigned handle of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u32);

/// Store-assigned handle of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub(crate) u32);

/// Store-assigned handle of a priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PriorityId(pub(crate) u32);

impl PriorityId {
    /// Reserved handle of the "Default" priority level
    pub const DEFAULT: PriorityId = PriorityId(0);

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl TaskId {
    pub(crate) const UNASSIGNED: TaskId = TaskId(0);
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        digits
            .parse::<u32>()
            .map(TaskId)
            .map_err(|_| format!("Invalid task ID '{}'. Use the number shown by list (e.g., '#3')", s))
    }
}

/// Task status
///
/// Serialized with the same human-readable labels the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Postponed,
    Completed,
    Delayed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Open,
        TaskStatus::InProgress,
        TaskStatus::Postponed,
        TaskStatus::Completed,
        TaskStatus::Delayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Postponed => "Postponed",
            TaskStatus::Completed => "Completed",
            TaskStatus::Delayed => "Delayed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "Invalid status '{}'. Valid options are: Open, In Progress, Postponed, Completed, Delayed",
                    s
                )
            })
    }
}

/// A category tasks can be grouped under
///
/// Equality and hashing are by title.
#[derive(Debug, Clone)]
pub struct Category {
    pub(crate) id: CategoryId,
    pub(crate) title: String,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

impl Category {
    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A priority level
///
/// Equality and hashing are by title.
#[derive(Debug, Clone)]
pub struct PriorityLevel {
    pub(crate) id: PriorityId,
    pub(crate) title: String,
}

impl PartialEq for PriorityLevel {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for PriorityLevel {}

impl Hash for PriorityLevel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

impl PriorityLevel {
    pub fn id(&self) -> PriorityId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_default(&self) -> bool {
        self.id.is_default()
    }
}

/// A dated reminder owned by a single task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reminder {
    pub date: NaiveDate,
    pub message: String,
}

impl Reminder {
    pub fn new(date: NaiveDate, message: impl Into<String>) -> Self {
        Self {
            date,
            message: message.into(),
        }
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.message)
    }
}

/// How the date of a reminder is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    OneDayBefore,
    OneWeekBefore,
    OneMonthBefore,
    /// An explicitly picked date
    OnDate(NaiveDate),
}

impl ReminderKind {
    /// Compute the reminder date for a task with the given deadline.
    ///
    /// Relative kinds need a deadline. Month subtraction clamps to the last
    /// valid day (e.g. March 31 -> February 28).
    pub fn resolve(self, deadline: Option<NaiveDate>) -> StoreResult<NaiveDate> {
        if let ReminderKind::OnDate(date) = self {
            return Ok(date);
        }
        let deadline = deadline.ok_or(StoreError::MissingDeadline)?;
        let date = match self {
            ReminderKind::OneDayBefore => deadline.checked_sub_days(Days::new(1)),
            ReminderKind::OneWeekBefore => deadline.checked_sub_days(Days::new(7)),
            ReminderKind::OneMonthBefore => deadline.checked_sub_months(Months::new(1)),
            ReminderKind::OnDate(date) => Some(date),
        };
        date.ok_or(StoreError::ReminderDateOutOfRange)
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "one_day_before" => Ok(ReminderKind::OneDayBefore),
            "week" | "one_week_before" => Ok(ReminderKind::OneWeekBefore),
            "month" | "one_month_before" => Ok(ReminderKind::OneMonthBefore),
            _ => Err(format!(
                "Invalid reminder kind '{}'. Valid options are: day, week, month",
                s
            )),
        }
    }
}

/// A tracked task
///
/// Reminders can only be changed through the store so the store-wide
/// reminder rules always apply. The id is assigned when the task is added.
#[derive(Debug, Clone)]
pub struct Task {
    pub(crate) id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<CategoryId>,
    pub priority: Option<PriorityId>,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
    pub(crate) reminders: Vec<Reminder>,
}

impl Task {
    /// Create an open task with the "Default" priority and nothing else set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            title: title.into(),
            description: None,
            category: None,
            priority: Some(PriorityId::DEFAULT),
            deadline: None,
            status: TaskStatus::Open,
            reminders: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_priority(mut self, priority: Option<PriorityId>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Reminders in insertion order
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Append a reminder without any validation (used for trusted loaded data)
    pub(crate) fn push_reminder(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    /// First reminder that would fall after the given deadline, if any
    pub(crate) fn reminder_after(&self, deadline: Option<NaiveDate>) -> Option<&Reminder> {
        let deadline = deadline?;
        self.reminders.iter().find(|r| r.date > deadline)
    }
}
