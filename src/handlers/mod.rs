//! Front-end action handlers
//!
//! Each handler validates raw input, calls into the store and returns the
//! message to show the user. A rejected action is an `Err` and leaves the
//! store unchanged.

pub mod categories;
pub mod list;
pub mod priorities;
pub mod reminders;
pub mod tasks;
