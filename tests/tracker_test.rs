mod common;

use common::{extract_id_from_response, get_test_tracker};
use task_tracker::{TaskStatus, TaskTracker};

fn add_task(tracker: &mut TaskTracker, title: &str, category: Option<&str>) -> String {
    let response = tracker
        .handle_add_task(
            title.to_string(),
            None,
            category.map(str::to_string),
            None,
            Some("2025-06-15".to_string()),
            None,
        )
        .unwrap();
    extract_id_from_response(&response)
}

#[test]
fn test_add_and_list_task() {
    let (mut tracker, _dir) = get_test_tracker();
    tracker.handle_add_category("Home".to_string()).unwrap();
    let id = add_task(&mut tracker, "Buy milk", Some("Home"));
    assert_eq!(id, "#1");

    let listing = tracker.handle_list(None, None, None).unwrap();
    assert!(listing.starts_with("Found 1 task(s):"));
    assert!(listing.contains("[#1] Buy milk"));
    assert!(listing.contains("Category: Home"));
    assert!(listing.contains("Priority: Default"));
    assert!(listing.contains("Deadline: 2025-06-15"));
    assert!(tracker.is_dirty());
}

#[test]
fn test_add_task_rejects_unknown_category() {
    let (mut tracker, _dir) = get_test_tracker();
    let err = tracker
        .handle_add_task(
            "Orphan".to_string(),
            None,
            Some("Nowhere".to_string()),
            None,
            None,
            None,
        )
        .unwrap_err();
    assert!(err.to_string().contains("Nowhere"));
    assert!(tracker.store().tasks().is_empty());
}

#[test]
fn test_list_filters_by_title_and_category() {
    let (mut tracker, _dir) = get_test_tracker();
    tracker.handle_add_category("Home".to_string()).unwrap();
    tracker.handle_add_category("Work".to_string()).unwrap();
    add_task(&mut tracker, "Buy milk", Some("Home"));
    add_task(&mut tracker, "Buy car", Some("Work"));

    let listing = tracker
        .handle_list(Some("buy".to_string()), Some("Home".to_string()), None)
        .unwrap();
    assert!(listing.contains("Buy milk"));
    assert!(!listing.contains("Buy car"));

    let none = tracker
        .handle_list(Some("bike".to_string()), None, None)
        .unwrap();
    assert_eq!(none, "No tasks found");
}

#[test]
fn test_update_and_delete_task() {
    let (mut tracker, _dir) = get_test_tracker();
    let id = add_task(&mut tracker, "Draft", None);

    tracker
        .handle_update_task(
            id.clone(),
            Some("Final".to_string()),
            Some("ready".to_string()),
            None,
            None,
            Some(String::new()),
        )
        .unwrap();
    let task = &tracker.store().tasks()[0];
    assert_eq!(task.title, "Final");
    assert_eq!(task.description.as_deref(), Some("ready"));
    assert!(task.deadline.is_none());

    let response = tracker.handle_delete_task(id).unwrap();
    assert!(response.contains("Final"));
    assert!(tracker.store().tasks().is_empty());
}

#[test]
fn test_completing_task_with_reminders_needs_confirmation() {
    let (mut tracker, _dir) = get_test_tracker();
    let id = add_task(&mut tracker, "Talk", None);
    tracker
        .handle_add_reminder(id.clone(), "slides".to_string(), Some("week".to_string()), None)
        .unwrap();

    let err = tracker
        .handle_change_status(id.clone(), "completed".to_string(), false)
        .unwrap_err();
    assert!(err.to_string().contains("--yes"));
    assert_eq!(tracker.store().reminders().len(), 1);
    assert_eq!(tracker.store().tasks()[0].status, TaskStatus::Open);

    let response = tracker
        .handle_change_status(id, "completed".to_string(), true)
        .unwrap();
    assert!(response.contains("1 reminder(s) deleted"));
    assert!(tracker.store().reminders().is_empty());
    assert_eq!(tracker.store().tasks()[0].status, TaskStatus::Completed);
}

#[test]
fn test_status_change_without_reminders_needs_no_confirmation() {
    let (mut tracker, _dir) = get_test_tracker();
    let id = add_task(&mut tracker, "Chore", None);
    tracker
        .handle_change_status(id, "in progress".to_string(), false)
        .unwrap();
    assert_eq!(tracker.store().tasks()[0].status, TaskStatus::InProgress);
}

#[test]
fn test_delete_category_needs_confirmation() {
    let (mut tracker, _dir) = get_test_tracker();
    tracker.handle_add_category("Work".to_string()).unwrap();
    add_task(&mut tracker, "Report", Some("Work"));
    add_task(&mut tracker, "Lunch", None);

    let err = tracker
        .handle_delete_category("Work".to_string(), false)
        .unwrap_err();
    assert!(err.to_string().contains("Report"));
    assert_eq!(tracker.store().tasks().len(), 2);

    tracker
        .handle_delete_category("Work".to_string(), true)
        .unwrap();
    assert!(tracker.store().categories().is_empty());
    assert_eq!(tracker.store().tasks().len(), 1);
    assert_eq!(tracker.store().tasks()[0].title, "Lunch");
}

#[test]
fn test_duplicate_category_reported() {
    let (mut tracker, _dir) = get_test_tracker();
    tracker.handle_add_category("Home".to_string()).unwrap();
    let err = tracker
        .handle_add_category("Home".to_string())
        .unwrap_err();
    assert_eq!(err.to_string(), "Category 'Home' already exists");
    assert_eq!(tracker.store().categories().len(), 1);
}

#[test]
fn test_delete_priority_moves_tasks_to_default() {
    let (mut tracker, _dir) = get_test_tracker();
    tracker.handle_add_priority("High".to_string()).unwrap();
    tracker
        .handle_add_task(
            "Urgent".to_string(),
            None,
            None,
            Some("High".to_string()),
            None,
            None,
        )
        .unwrap();

    let response = tracker.handle_delete_priority("High".to_string()).unwrap();
    assert!(response.contains("1 task(s) moved to Default"));
    let store = tracker.store();
    assert!(store.priority_of(&store.tasks()[0]).unwrap().is_default());
    assert!(tracker.handle_delete_priority("Default".to_string()).is_err());
}

#[test]
fn test_shutdown_persists_changes() {
    let (mut tracker, dir) = get_test_tracker();
    let path = dir.path().join("tasks.json");
    tracker.handle_add_category("Home".to_string()).unwrap();
    add_task(&mut tracker, "Water plants", Some("Home"));
    tracker.shutdown().unwrap();
    assert!(!tracker.is_dirty());
    drop(tracker);

    let reloaded = TaskTracker::new(&path).unwrap();
    let store = reloaded.store();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.category_of(&store.tasks()[0]).unwrap().title(), "Home");
}

#[test]
fn test_drop_saves_dirty_tracker() {
    let (mut tracker, dir) = get_test_tracker();
    let path = dir.path().join("tasks.json");
    tracker.handle_add_priority("Low".to_string()).unwrap();
    drop(tracker);

    let reloaded = TaskTracker::new(&path).unwrap();
    assert!(reloaded.store().find_priority_by_title("Low").is_some());
}

#[test]
fn test_read_only_commands_leave_file_untouched() {
    let (tracker, dir) = get_test_tracker();
    tracker.handle_summary().unwrap();
    tracker.handle_list_reminders().unwrap();
    assert!(!tracker.is_dirty());
    drop(tracker);
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn test_unreadable_file_is_not_overwritten() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(TaskTracker::new(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
}

// IDs shown by one run must name the same tasks in the next
#[test]
fn test_task_ids_survive_reload_between_deletes() {
    let (mut tracker, dir) = get_test_tracker();
    let path = dir.path().join("tasks.json");
    for title in ["A", "B", "C", "D"] {
        add_task(&mut tracker, title, None);
    }
    tracker.shutdown().unwrap();
    drop(tracker);

    let mut tracker = TaskTracker::new(&path).unwrap();
    let response = tracker.handle_delete_task("#2".to_string()).unwrap();
    assert!(response.contains("'B'"));
    tracker.shutdown().unwrap();
    drop(tracker);

    let mut tracker = TaskTracker::new(&path).unwrap();
    let response = tracker.handle_delete_task("#3".to_string()).unwrap();
    assert!(response.contains("'C'"));
    tracker.shutdown().unwrap();
    drop(tracker);

    let mut tracker = TaskTracker::new(&path).unwrap();
    assert_eq!(common::task_titles(tracker.store()), vec!["A", "D"]);
    let listing = tracker.handle_list(None, None, None).unwrap();
    assert!(listing.contains("[#4] D"));

    // New tasks never reuse a handle that was issued before
    let id = add_task(&mut tracker, "E", None);
    assert_eq!(id, "#5");
}

#[test]
fn test_update_reminder_message_keeps_date() {
    let (mut tracker, _dir) = get_test_tracker();
    let id = add_task(&mut tracker, "Talk", None);
    tracker
        .handle_add_reminder(id.clone(), "slides".to_string(), Some("week".to_string()), None)
        .unwrap();

    let response = tracker
        .handle_update_reminder(
            id.clone(),
            "slides".to_string(),
            Some("final slides".to_string()),
            None,
            None,
        )
        .unwrap();
    assert!(response.contains("2025-06-08: final slides"));

    let reminders = tracker.store().reminders();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].message, "final slides");
    assert_eq!(reminders[0].date, common::date(2025, 6, 8));
}

#[test]
fn test_update_reminder_date_keeps_message() {
    let (mut tracker, _dir) = get_test_tracker();
    let id = add_task(&mut tracker, "Talk", None);
    tracker
        .handle_add_reminder(id.clone(), "slides".to_string(), Some("week".to_string()), None)
        .unwrap();

    tracker
        .handle_update_reminder(id.clone(), "slides".to_string(), None, Some("day".to_string()), None)
        .unwrap();
    let reminders = tracker.store().reminders();
    assert_eq!(reminders[0].message, "slides");
    assert_eq!(reminders[0].date, common::date(2025, 6, 14));

    let err = tracker
        .handle_update_reminder(id, "missing".to_string(), Some("x".to_string()), None, None)
        .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_delete_reminder() {
    let (mut tracker, _dir) = get_test_tracker();
    let id = add_task(&mut tracker, "Talk", None);
    tracker
        .handle_add_reminder(id.clone(), "slides".to_string(), None, Some("2025-06-01".to_string()))
        .unwrap();

    let response = tracker
        .handle_delete_reminder(id.clone(), "slides".to_string())
        .unwrap();
    assert!(response.contains("2025-06-01: slides"));
    assert!(tracker.store().reminders().is_empty());
    assert!(tracker.handle_delete_reminder(id, "slides".to_string()).is_err());
    assert_eq!(tracker.handle_list_reminders().unwrap(), "No reminders");
}

#[test]
fn test_failed_shutdown_is_not_retried() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    // The parent "directory" is a file, so the save cannot succeed
    let mut tracker = TaskTracker::new(blocker.join("tasks.json")).unwrap();
    tracker.handle_add_category("Home".to_string()).unwrap();

    assert!(tracker.shutdown().is_err());
    assert!(!tracker.is_dirty());
    assert!(tracker.shutdown().is_ok());
}
