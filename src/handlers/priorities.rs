//! Priority level handlers

use anyhow::{Result, bail};

use crate::TaskTracker;
use crate::formatting;
use crate::tracker::DEFAULT_PRIORITY_TITLE;
use crate::validation;

impl TaskTracker {
    pub fn handle_add_priority(&mut self, title: String) -> Result<String> {
        if self.store.find_priority_by_title(&title).is_some() {
            bail!("Priority '{}' already exists", title);
        }
        self.store.add_priority(title.clone())?;
        self.mark_dirty();
        Ok(format!("Priority '{}' created", title))
    }

    pub fn handle_rename_priority(&mut self, title: String, new_title: String) -> Result<String> {
        let id = validation::resolve_priority(&self.store, &title)?;
        self.store.update_priority(id, new_title.clone())?;
        self.mark_dirty();
        Ok(format!("Priority '{}' renamed to '{}'", title, new_title))
    }

    /// Delete a priority level; its tasks move to "Default"
    pub fn handle_delete_priority(&mut self, title: String) -> Result<String> {
        let id = validation::resolve_priority(&self.store, &title)?;
        let moved = self.store.delete_priority(id)?;
        self.mark_dirty();
        Ok(format!(
            "Deleted priority '{}' ({} task(s) moved to {})",
            title,
            moved.len(),
            DEFAULT_PRIORITY_TITLE
        ))
    }

    pub fn handle_list_priorities(&self) -> Result<String> {
        Ok(formatting::format_priorities(self.store.priorities()))
    }
}
