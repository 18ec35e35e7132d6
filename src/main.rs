//! Task Tracker - Main Entry Point
//!
//! Command-line front end. Each run loads the data file, performs one action,
//! and saves the file again if the action changed anything.
//! The actual implementation is in the `task_tracker` library.

use anyhow::Result;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use task_tracker::TaskTracker;
use task_tracker::storage::DEFAULT_DATA_FILE;

/// Task Tracker - personal tasks with categories, priorities, deadlines and reminders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks, optionally filtered
    List {
        /// Case-insensitive part of the title
        #[arg(long)]
        title: Option<String>,
        /// Exact category title
        #[arg(long)]
        category: Option<String>,
        /// Exact priority title
        #[arg(long)]
        priority: Option<String>,
    },
    /// Show task counts
    Summary,
    /// Create a task
    AddTask {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Priority title (default: "Default")
        #[arg(long)]
        priority: Option<String>,
        /// Deadline YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
        /// Open, In Progress, Postponed, Completed or Delayed
        #[arg(long)]
        status: Option<String>,
    },
    /// Edit a task; "" clears an optional field
    UpdateTask {
        /// Task ID from list (e.g., "#3")
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Delete a task and its reminders
    DeleteTask { id: String },
    /// Change a task's status
    SetStatus {
        id: String,
        status: String,
        /// Allow completing a task that has reminders (they are deleted)
        #[arg(long)]
        yes: bool,
    },
    /// List categories
    Categories,
    AddCategory { title: String },
    RenameCategory { title: String, new_title: String },
    /// Delete a category and every task in it
    DeleteCategory {
        title: String,
        /// Allow deleting the category's tasks
        #[arg(long)]
        yes: bool,
    },
    /// List priority levels
    Priorities,
    AddPriority { title: String },
    RenamePriority { title: String, new_title: String },
    /// Delete a priority level; its tasks move to "Default"
    DeletePriority { title: String },
    /// List all reminders
    Reminders,
    /// Add a reminder to a task
    AddReminder {
        task_id: String,
        message: String,
        /// day, week or month before the deadline
        #[arg(long, conflicts_with = "on")]
        before: Option<String>,
        /// Explicit date YYYY-MM-DD
        #[arg(long)]
        on: Option<String>,
    },
    /// Change one of a task's reminders
    UpdateReminder {
        task_id: String,
        /// Current message of the reminder
        old_message: String,
        /// New message (default: keep)
        #[arg(long)]
        message: Option<String>,
        /// day, week or month before the deadline (default: keep the date)
        #[arg(long, conflicts_with = "on")]
        before: Option<String>,
        /// Explicit date YYYY-MM-DD
        #[arg(long)]
        on: Option<String>,
    },
    DeleteReminder { task_id: String, message: String },
}

fn run(tracker: &mut TaskTracker, command: Command) -> Result<String> {
    match command {
        Command::List {
            title,
            category,
            priority,
        } => tracker.handle_list(title, category, priority),
        Command::Summary => tracker.handle_summary(),
        Command::AddTask {
            title,
            description,
            category,
            priority,
            deadline,
            status,
        } => tracker.handle_add_task(title, description, category, priority, deadline, status),
        Command::UpdateTask {
            id,
            title,
            description,
            category,
            priority,
            deadline,
        } => tracker.handle_update_task(id, title, description, category, priority, deadline),
        Command::DeleteTask { id } => tracker.handle_delete_task(id),
        Command::SetStatus { id, status, yes } => tracker.handle_change_status(id, status, yes),
        Command::Categories => tracker.handle_list_categories(),
        Command::AddCategory { title } => tracker.handle_add_category(title),
        Command::RenameCategory { title, new_title } => {
            tracker.handle_rename_category(title, new_title)
        }
        Command::DeleteCategory { title, yes } => tracker.handle_delete_category(title, yes),
        Command::Priorities => tracker.handle_list_priorities(),
        Command::AddPriority { title } => tracker.handle_add_priority(title),
        Command::RenamePriority { title, new_title } => {
            tracker.handle_rename_priority(title, new_title)
        }
        Command::DeletePriority { title } => tracker.handle_delete_priority(title),
        Command::Reminders => tracker.handle_list_reminders(),
        Command::AddReminder {
            task_id,
            message,
            before,
            on,
        } => tracker.handle_add_reminder(task_id, message, before, on),
        Command::UpdateReminder {
            task_id,
            old_message,
            message,
            before,
            on,
        } => tracker.handle_update_reminder(task_id, old_message, message, before, on),
        Command::DeleteReminder { task_id, message } => {
            tracker.handle_delete_reminder(task_id, message)
        }
    }
}

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("warn")?.start()?;

    let args = Args::parse();
    let mut tracker = TaskTracker::new(&args.file)?;

    let outcome = run(&mut tracker, args.command);
    tracker.shutdown()?;

    match outcome {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
